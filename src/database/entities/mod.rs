pub mod activity_logs;
pub mod biosecurity_commodities;
pub mod commodity_prices;
pub mod company_profiles;
pub mod crop_productions;
pub mod farmer_profiles;
pub mod livestock_productions;
pub mod user_roles;
pub mod user_sessions;
pub mod users;
