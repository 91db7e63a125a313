use async_graphql::*;

use crate::app_context::RecordPayload;
use crate::database::entities::{company_profiles, farmer_profiles};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{
    CompanyProfile, CompanyProfileInput, FarmerProfile, FarmerProfileInput, ImportResult,
};

#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    async fn create_company_profile(
        &self,
        ctx: &Context<'_>,
        input: CompanyProfileInput,
    ) -> Result<CompanyProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let company = context
            .app
            .create_record::<company_profiles::Entity>(&context.session(ctx), payload)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CompanyProfile::from(company))
    }

    async fn update_company_profile(
        &self,
        ctx: &Context<'_>,
        uuid: String,
        input: CompanyProfileInput,
    ) -> Result<CompanyProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let company = context
            .app
            .update_record::<company_profiles::Entity>(
                &context.session(ctx),
                Some(uuid.as_str()),
                payload,
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CompanyProfile::from(company))
    }

    /// Soft delete; the profile stays reachable through `companyProfile(uuid)`
    async fn delete_company_profile(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<CompanyProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let company = context
            .app
            .delete_record::<company_profiles::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CompanyProfile::from(company))
    }

    async fn tokenized_create_company_profile(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CompanyProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let company = context
            .app
            .create_record::<company_profiles::Entity>(
                &context.session(ctx),
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CompanyProfile::from(company))
    }

    /// The token carries the record `uuid` alongside the fields to write
    async fn tokenized_update_company_profile(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CompanyProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let company = context
            .app
            .update_record::<company_profiles::Entity>(
                &context.session(ctx),
                None,
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CompanyProfile::from(company))
    }

    async fn tokenized_delete_company_profile(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CompanyProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let company = context
            .app
            .tokenized_delete_record::<company_profiles::Entity>(&context.session(ctx), &token)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CompanyProfile::from(company))
    }

    /// Base64 `.xlsx`; all rows are created or none
    async fn import_company_profiles(
        &self,
        ctx: &Context<'_>,
        file: String,
    ) -> Result<ImportResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let summary = context
            .app
            .import_records::<company_profiles::Entity>(&context.session(ctx), &file)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(ImportResult::from(summary))
    }

    async fn create_farmer_profile(
        &self,
        ctx: &Context<'_>,
        input: FarmerProfileInput,
    ) -> Result<FarmerProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let farmer = context
            .app
            .create_record::<farmer_profiles::Entity>(&context.session(ctx), payload)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(FarmerProfile::from(farmer))
    }

    async fn update_farmer_profile(
        &self,
        ctx: &Context<'_>,
        uuid: String,
        input: FarmerProfileInput,
    ) -> Result<FarmerProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let farmer = context
            .app
            .update_record::<farmer_profiles::Entity>(
                &context.session(ctx),
                Some(uuid.as_str()),
                payload,
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(FarmerProfile::from(farmer))
    }

    async fn delete_farmer_profile(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<FarmerProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let farmer = context
            .app
            .delete_record::<farmer_profiles::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(FarmerProfile::from(farmer))
    }

    async fn tokenized_create_farmer_profile(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<FarmerProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let farmer = context
            .app
            .create_record::<farmer_profiles::Entity>(
                &context.session(ctx),
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(FarmerProfile::from(farmer))
    }

    async fn tokenized_update_farmer_profile(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<FarmerProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let farmer = context
            .app
            .update_record::<farmer_profiles::Entity>(
                &context.session(ctx),
                None,
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(FarmerProfile::from(farmer))
    }

    async fn tokenized_delete_farmer_profile(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<FarmerProfile> {
        let context = ctx.data::<GraphQLContext>()?;
        let farmer = context
            .app
            .tokenized_delete_record::<farmer_profiles::Entity>(&context.session(ctx), &token)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(FarmerProfile::from(farmer))
    }

    async fn import_farmer_profiles(
        &self,
        ctx: &Context<'_>,
        file: String,
    ) -> Result<ImportResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let summary = context
            .app
            .import_records::<farmer_profiles::Entity>(&context.session(ctx), &file)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(ImportResult::from(summary))
    }
}
