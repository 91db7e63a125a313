// Mutation roots, one per functional area. Every record mutation runs the
// same envelope: session guard, optional token decode, coercion, then the
// write and its activity log entry in one transaction.

mod auth;
mod commodities;
mod production;
mod profiles;

use async_graphql::*;

#[derive(Default, MergedObject)]
pub struct Mutation(
    pub auth::AuthMutation,
    pub profiles::ProfileMutation,
    pub production::ProductionMutation,
    pub commodities::CommodityMutation,
);
