use async_graphql::*;

use crate::database::entities::{company_profiles, farmer_profiles};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{CompanyProfile, FarmerProfile};
use crate::services::ListQuery;

#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    /// Live company profiles, newest first
    async fn all_company_profiles(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<Vec<CompanyProfile>> {
        let context = ctx.data::<GraphQLContext>()?;
        let companies = context
            .app
            .list_records::<company_profiles::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(companies.into_iter().map(CompanyProfile::from).collect())
    }

    /// Signed `{"rows": [...]}` of the same listing
    async fn tokenized_all_company_profiles(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .tokenized_list_records::<company_profiles::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn count_company_profiles(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
    ) -> Result<u64> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .count_records::<company_profiles::Entity>(&context.session(ctx), search.as_deref())
            .await
            .map_err(StructuredError::from_core_error)
    }

    /// Lookup by uuid, including soft-deleted profiles
    async fn company_profile(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<Option<CompanyProfile>> {
        let context = ctx.data::<GraphQLContext>()?;
        let company = context
            .app
            .get_record::<company_profiles::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(company.map(CompanyProfile::from))
    }

    /// Base64 `.xlsx` of the live company profiles
    async fn export_company_profiles(&self, ctx: &Context<'_>) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .export_records::<company_profiles::Entity>(&context.session(ctx))
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn all_farmer_profiles(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<Vec<FarmerProfile>> {
        let context = ctx.data::<GraphQLContext>()?;
        let farmers = context
            .app
            .list_records::<farmer_profiles::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(farmers.into_iter().map(FarmerProfile::from).collect())
    }

    async fn tokenized_all_farmer_profiles(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .tokenized_list_records::<farmer_profiles::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn count_farmer_profiles(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
    ) -> Result<u64> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .count_records::<farmer_profiles::Entity>(&context.session(ctx), search.as_deref())
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn farmer_profile(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<Option<FarmerProfile>> {
        let context = ctx.data::<GraphQLContext>()?;
        let farmer = context
            .app
            .get_record::<farmer_profiles::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(farmer.map(FarmerProfile::from))
    }

    async fn export_farmer_profiles(&self, ctx: &Context<'_>) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .export_records::<farmer_profiles::Entity>(&context.session(ctx))
            .await
            .map_err(StructuredError::from_core_error)
    }
}
