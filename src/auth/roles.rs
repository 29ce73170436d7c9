// Account kinds and their profile fields

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::auth::models::Role;

/// Descriptor for one kind of account
///
/// Everything that differs between users, customers, coaches and executors lives
/// here; register/login/refresh/profile logic is shared.
pub trait AccountKind: Send + Sync + 'static {
    /// Role-specific profile fields
    type Profile: Validate + Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + Unpin + 'static;

    const ROLE: Role;

    /// Table holding this kind of account
    const TABLE: &'static str;
}

/// Plain platform user
pub struct UserAccount;

/// Client ordering services
pub struct CustomerAccount;

pub struct CoachAccount;

/// Service executor (accountant, auditor, consultant)
pub struct ExecutorAccount;

impl AccountKind for UserAccount {
    type Profile = UserProfile;
    const ROLE: Role = Role::User;
    const TABLE: &'static str = "users";
}

impl AccountKind for CustomerAccount {
    type Profile = CustomerProfile;
    const ROLE: Role = Role::Customer;
    const TABLE: &'static str = "customers";
}

impl AccountKind for CoachAccount {
    type Profile = CoachProfile;
    const ROLE: Role = Role::Coach;
    const TABLE: &'static str = "coaches";
}

impl AccountKind for ExecutorAccount {
    type Profile = ExecutorProfile;
    const ROLE: Role = Role::Executor;
    const TABLE: &'static str = "executors";
}

/// Plain users carry no profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {}

impl Validate for UserProfile {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerProfile {
    /// Legal form: LLP, sole proprietor, authorised representative
    #[validate(length(min = 1, message = "client_type is required"))]
    pub client_type: String,
    #[validate(length(min = 1, message = "company_name is required"))]
    pub company_name: String,
    #[validate(length(min = 1, message = "iin is required"))]
    pub iin: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "job_position is required"))]
    pub job_position: String,
    #[validate(length(min = 1, message = "phone_number is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "work_description is required"))]
    pub work_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CoachProfile {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "surname is required"))]
    pub surname: String,
    #[validate(length(min = 1, message = "phone_number is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "exp_coach is required"))]
    pub exp_coach: String,
    #[validate(length(min = 1, message = "specializations is required"))]
    pub specializations: String,
    #[validate(length(min = 1, message = "education_certificates is required"))]
    pub education_certificates: String,
    #[validate(length(min = 1, message = "achievements_experience is required"))]
    pub achievements_experience: String,
    #[validate(length(min = 1, message = "methodology is required"))]
    pub methodology: String,
    #[validate(length(min = 1, message = "about_coach is required"))]
    pub about_coach: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ExecutorProfile {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "surname is required"))]
    pub surname: String,
    #[validate(length(min = 1, message = "patronymic is required"))]
    pub patronymic: String,
    #[validate(length(min = 1, message = "iin is required"))]
    pub iin: String,
    #[validate(length(min = 1, message = "phone_number is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "exp_work is required"))]
    pub exp_work: String,
    #[validate(length(min = 1, message = "specializations is required"))]
    pub specializations: String,
    #[validate(length(min = 1, message = "education is required"))]
    pub education: String,
    #[validate(length(min = 1, message = "work_format is required"))]
    pub work_format: String,
    #[validate(range(min = 0.0, message = "hourly_rate must not be negative"))]
    pub hourly_rate: f64,
    #[validate(length(min = 1, message = "about_executor is required"))]
    pub about_executor: String,
}
