use async_graphql::*;

use crate::app_context::RecordPayload;
use crate::database::entities::{crop_productions, livestock_productions};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{
    CropProduction, CropProductionInput, ImportResult, LivestockProduction,
    LivestockProductionInput,
};

#[derive(Default)]
pub struct ProductionMutation;

#[Object]
impl ProductionMutation {
    async fn create_crop_production(
        &self,
        ctx: &Context<'_>,
        input: CropProductionInput,
    ) -> Result<CropProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let crop = context
            .app
            .create_record::<crop_productions::Entity>(&context.session(ctx), payload)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CropProduction::from(crop))
    }

    async fn update_crop_production(
        &self,
        ctx: &Context<'_>,
        uuid: String,
        input: CropProductionInput,
    ) -> Result<CropProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let crop = context
            .app
            .update_record::<crop_productions::Entity>(
                &context.session(ctx),
                Some(uuid.as_str()),
                payload,
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CropProduction::from(crop))
    }

    async fn delete_crop_production(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<CropProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let crop = context
            .app
            .delete_record::<crop_productions::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CropProduction::from(crop))
    }

    async fn tokenized_create_crop_production(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CropProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let crop = context
            .app
            .create_record::<crop_productions::Entity>(
                &context.session(ctx),
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CropProduction::from(crop))
    }

    async fn tokenized_update_crop_production(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CropProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let crop = context
            .app
            .update_record::<crop_productions::Entity>(
                &context.session(ctx),
                None,
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CropProduction::from(crop))
    }

    async fn tokenized_delete_crop_production(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CropProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let crop = context
            .app
            .tokenized_delete_record::<crop_productions::Entity>(&context.session(ctx), &token)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CropProduction::from(crop))
    }

    async fn import_crop_productions(
        &self,
        ctx: &Context<'_>,
        file: String,
    ) -> Result<ImportResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let summary = context
            .app
            .import_records::<crop_productions::Entity>(&context.session(ctx), &file)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(ImportResult::from(summary))
    }

    async fn create_livestock_production(
        &self,
        ctx: &Context<'_>,
        input: LivestockProductionInput,
    ) -> Result<LivestockProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let livestock = context
            .app
            .create_record::<livestock_productions::Entity>(&context.session(ctx), payload)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(LivestockProduction::from(livestock))
    }

    async fn update_livestock_production(
        &self,
        ctx: &Context<'_>,
        uuid: String,
        input: LivestockProductionInput,
    ) -> Result<LivestockProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let livestock = context
            .app
            .update_record::<livestock_productions::Entity>(
                &context.session(ctx),
                Some(uuid.as_str()),
                payload,
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(LivestockProduction::from(livestock))
    }

    async fn delete_livestock_production(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<LivestockProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let livestock = context
            .app
            .delete_record::<livestock_productions::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(LivestockProduction::from(livestock))
    }

    async fn tokenized_create_livestock_production(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<LivestockProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let livestock = context
            .app
            .create_record::<livestock_productions::Entity>(
                &context.session(ctx),
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(LivestockProduction::from(livestock))
    }

    async fn tokenized_update_livestock_production(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<LivestockProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let livestock = context
            .app
            .update_record::<livestock_productions::Entity>(
                &context.session(ctx),
                None,
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(LivestockProduction::from(livestock))
    }

    async fn tokenized_delete_livestock_production(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<LivestockProduction> {
        let context = ctx.data::<GraphQLContext>()?;
        let livestock = context
            .app
            .tokenized_delete_record::<livestock_productions::Entity>(&context.session(ctx), &token)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(LivestockProduction::from(livestock))
    }

    async fn import_livestock_productions(
        &self,
        ctx: &Context<'_>,
        file: String,
    ) -> Result<ImportResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let summary = context
            .app
            .import_records::<livestock_productions::Entity>(&context.session(ctx), &file)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(ImportResult::from(summary))
    }
}
