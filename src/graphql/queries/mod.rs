// Query roots, one per functional area, merged into a single Query type.

mod activity;
mod auth;
mod commodities;
mod production;
mod profiles;

use async_graphql::*;

#[derive(Default, MergedObject)]
pub struct Query(
    pub profiles::ProfileQuery,
    pub production::ProductionQuery,
    pub commodities::CommodityQuery,
    pub auth::AuthQuery,
    pub activity::ActivityQuery,
);
