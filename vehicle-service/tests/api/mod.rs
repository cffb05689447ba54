//! API integration tests infrastructure
//!
//! In-memory repositories standing in for MySQL, a country directory with a
//! fixed set of codes, and helpers for issuing test access tokens.


use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use motorpool_common::{AppError, Result, StringUuid};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use vehicle_service::config::JwtConfig;
use vehicle_service::directory::CountryDirectory;
use vehicle_service::domain::{
    ApplicationUser, CreateBrandInput, CreateOwnerInput, CreateVehicleInput, Vehicle,
    VehicleBrand, VehicleFilter, VehicleOwner,
};
use vehicle_service::middleware::FLEET_ADMIN_ROLE;
use vehicle_service::repository::{
    BrandRepository, OwnerRepository, UserRepository, VehicleRepository,
};

// ============================================================================
// Tokens
// ============================================================================

pub const TEST_SECRET: &str = "test-secret-key-for-testing-purposes-only";
pub const TEST_ISSUER: &str = "https://id.motorpool.test";
pub const TEST_AUDIENCE: &str = "motorpool";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        issuer: TEST_ISSUER.to_string(),
        audience: TEST_AUDIENCE.to_string(),
        public_key_pem: None,
        secret: Some(TEST_SECRET.to_string()),
        leeway_secs: 5,
    }
}

/// HS256 token for `subject` carrying `roles`
pub fn token_for(subject: &str, roles: &[&str]) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": subject,
        "email": format!("{}@example.com", subject),
        "name": subject,
        "roles": roles,
        "iss": TEST_ISSUER,
        "aud": TEST_AUDIENCE,
        "iat": now,
        "exp": now + 3600,
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token_for("admin", &[FLEET_ADMIN_ROLE])
}

pub fn viewer_token() -> String {
    token_for("viewer", &[])
}

// ============================================================================
// Test Data
// ============================================================================

pub fn create_test_brand(name: &str, country_code: &str) -> VehicleBrand {
    VehicleBrand::new(
        &CreateBrandInput {
            name: name.to_string(),
            country_code: country_code.to_string(),
        },
        "seed",
    )
}

pub fn create_test_owner(first_name: &str, last_name: &str, email: &str) -> VehicleOwner {
    VehicleOwner::new(
        &CreateOwnerInput {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: None,
        },
        "seed",
    )
}

pub fn create_test_vehicle(
    vin: &str,
    brand_id: StringUuid,
    owner_id: Option<StringUuid>,
) -> Vehicle {
    Vehicle::new(
        &CreateVehicleInput {
            vin: vin.to_string(),
            license_plate: "ABC 123".to_string(),
            model: "XC90".to_string(),
            model_year: 2021,
            color: None,
            brand_id,
            owner_id,
        },
        "seed",
    )
}

// ============================================================================
// Test Brand Repository
// ============================================================================

pub struct TestBrandRepository {
    brands: Arc<RwLock<Vec<VehicleBrand>>>,
}

impl TestBrandRepository {
    pub fn new() -> Self {
        Self {
            brands: Arc::new(RwLock::new(vec![])),
        }
    }

    pub async fn add_brand(&self, brand: VehicleBrand) {
        self.brands.write().await.push(brand);
    }

    pub async fn len(&self) -> usize {
        self.brands.read().await.len()
    }
}

impl Default for TestBrandRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrandRepository for TestBrandRepository {
    async fn create(&self, brand: &VehicleBrand) -> Result<()> {
        let mut brands = self.brands.write().await;
        if brands.iter().any(|b| b.name.eq_ignore_ascii_case(&brand.name)) {
            return Err(AppError::Conflict(format!(
                "Brand with name '{}' already exists",
                brand.name
            )));
        }
        brands.push(brand.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<VehicleBrand>> {
        let brands = self.brands.read().await;
        Ok(brands.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleBrand>> {
        let brands = self.brands.read().await;
        Ok(brands
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<VehicleBrand>> {
        let mut brands = self.brands.read().await.clone();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(brands, offset, limit))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.brands.read().await.len() as i64)
    }

    async fn update(&self, brand: &VehicleBrand) -> Result<()> {
        let mut brands = self.brands.write().await;
        match brands.iter_mut().find(|b| b.id == brand.id) {
            Some(existing) => {
                *existing = brand.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Brand {} not found", brand.id))),
        }
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let mut brands = self.brands.write().await;
        let before = brands.len();
        brands.retain(|b| b.id != id);
        if brands.len() == before {
            return Err(AppError::NotFound(format!("Brand {} not found", id)));
        }
        Ok(())
    }
}

// ============================================================================
// Test Owner Repository
// ============================================================================

pub struct TestOwnerRepository {
    owners: Arc<RwLock<Vec<VehicleOwner>>>,
}

impl TestOwnerRepository {
    pub fn new() -> Self {
        Self {
            owners: Arc::new(RwLock::new(vec![])),
        }
    }

    pub async fn add_owner(&self, owner: VehicleOwner) {
        self.owners.write().await.push(owner);
    }
}

impl Default for TestOwnerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OwnerRepository for TestOwnerRepository {
    async fn create(&self, owner: &VehicleOwner) -> Result<()> {
        let mut owners = self.owners.write().await;
        if owners.iter().any(|o| o.email == owner.email) {
            return Err(AppError::Conflict(format!(
                "Owner with email '{}' already exists",
                owner.email
            )));
        }
        owners.push(owner.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<VehicleOwner>> {
        let owners = self.owners.read().await;
        Ok(owners.iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<VehicleOwner>> {
        let owners = self.owners.read().await;
        Ok(owners.iter().find(|o| o.email == email).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<VehicleOwner>> {
        let mut owners = self.owners.read().await.clone();
        owners.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(page(owners, offset, limit))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.owners.read().await.len() as i64)
    }

    async fn update(&self, owner: &VehicleOwner) -> Result<()> {
        let mut owners = self.owners.write().await;
        match owners.iter_mut().find(|o| o.id == owner.id) {
            Some(existing) => {
                *existing = owner.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Owner {} not found", owner.id))),
        }
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let mut owners = self.owners.write().await;
        let before = owners.len();
        owners.retain(|o| o.id != id);
        if owners.len() == before {
            return Err(AppError::NotFound(format!("Owner {} not found", id)));
        }
        Ok(())
    }
}

// ============================================================================
// Test Vehicle Repository
// ============================================================================

pub struct TestVehicleRepository {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
}

impl TestVehicleRepository {
    pub fn new() -> Self {
        Self {
            vehicles: Arc::new(RwLock::new(vec![])),
        }
    }

    pub async fn add_vehicle(&self, vehicle: Vehicle) {
        self.vehicles.write().await.push(vehicle);
    }

    pub async fn get(&self, id: StringUuid) -> Option<Vehicle> {
        self.vehicles.read().await.iter().find(|v| v.id == id).cloned()
    }

    async fn filtered(&self, filter: &VehicleFilter) -> Vec<Vehicle> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .read()
            .await
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.modification.created_at.cmp(&a.modification.created_at));
        vehicles
    }
}

impl Default for TestVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for TestVehicleRepository {
    async fn create(&self, vehicle: &Vehicle) -> Result<()> {
        let mut vehicles = self.vehicles.write().await;
        if vehicles.iter().any(|v| v.vin == vehicle.vin) {
            return Err(AppError::Conflict(format!(
                "Vehicle with VIN '{}' already exists",
                vehicle.vin
            )));
        }
        vehicles.push(vehicle.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.vin == vin).cloned())
    }

    async fn list(&self, filter: &VehicleFilter, offset: i64, limit: i64) -> Result<Vec<Vehicle>> {
        Ok(page(self.filtered(filter).await, offset, limit))
    }

    async fn count(&self, filter: &VehicleFilter) -> Result<i64> {
        Ok(self.filtered(filter).await.len() as i64)
    }

    async fn count_by_brand(&self, brand_id: StringUuid) -> Result<i64> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().filter(|v| v.brand_id == brand_id).count() as i64)
    }

    async fn count_by_owner(&self, owner_id: StringUuid) -> Result<i64> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles
            .iter()
            .filter(|v| v.owner_id == Some(owner_id))
            .count() as i64)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => {
                *existing = vehicle.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Vehicle {} not found", vehicle.id))),
        }
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        if vehicles.len() == before {
            return Err(AppError::NotFound(format!("Vehicle {} not found", id)));
        }
        Ok(())
    }
}

// ============================================================================
// Test User Repository
// ============================================================================

pub struct TestUserRepository {
    users: Arc<RwLock<Vec<ApplicationUser>>>,
}

impl TestUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(vec![])),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for TestUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for TestUserRepository {
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<ApplicationUser>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<ApplicationUser>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.subject == subject).cloned())
    }

    async fn upsert(&self, user: &ApplicationUser) -> Result<ApplicationUser> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.subject == user.subject) {
            Some(existing) => {
                existing.email = user.email.clone();
                existing.display_name = user.display_name.clone();
                existing.last_seen_at = user.last_seen_at;
                Ok(existing.clone())
            }
            None => {
                users.push(user.clone());
                Ok(user.clone())
            }
        }
    }
}

// ============================================================================
// Test Country Directory
// ============================================================================

pub struct TestCountryDirectory {
    codes: HashSet<String>,
}

impl TestCountryDirectory {
    pub fn with_codes(codes: &[&str]) -> Self {
        Self {
            codes: codes.iter().map(|c| c.to_ascii_uppercase()).collect(),
        }
    }
}

impl Default for TestCountryDirectory {
    fn default() -> Self {
        Self::with_codes(&["SE", "SWE", "DE", "DEU", "JP", "JPN"])
    }
}

#[async_trait]
impl CountryDirectory for TestCountryDirectory {
    async fn country_exists(&self, code: &str) -> Result<bool> {
        Ok(self.codes.contains(&code.to_ascii_uppercase()))
    }
}

fn page<T>(items: Vec<T>, offset: i64, limit: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}
