use async_graphql::*;

use crate::database::entities::{crop_productions, livestock_productions};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{CropProduction, LivestockProduction};
use crate::services::ListQuery;

#[derive(Default)]
pub struct ProductionQuery;

#[Object]
impl ProductionQuery {
    async fn all_crop_productions(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<Vec<CropProduction>> {
        let context = ctx.data::<GraphQLContext>()?;
        let crops = context
            .app
            .list_records::<crop_productions::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(crops.into_iter().map(CropProduction::from).collect())
    }

    async fn tokenized_all_crop_productions(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .tokenized_list_records::<crop_productions::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn count_crop_productions(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
    ) -> Result<u64> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .count_records::<crop_productions::Entity>(&context.session(ctx), search.as_deref())
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn crop_production(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<Option<CropProduction>> {
        let context = ctx.data::<GraphQLContext>()?;
        let crop = context
            .app
            .get_record::<crop_productions::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(crop.map(CropProduction::from))
    }

    async fn export_crop_productions(&self, ctx: &Context<'_>) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .export_records::<crop_productions::Entity>(&context.session(ctx))
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn all_livestock_productions(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<Vec<LivestockProduction>> {
        let context = ctx.data::<GraphQLContext>()?;
        let livestock = context
            .app
            .list_records::<livestock_productions::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(livestock.into_iter().map(LivestockProduction::from).collect())
    }

    async fn tokenized_all_livestock_productions(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .tokenized_list_records::<livestock_productions::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn count_livestock_productions(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
    ) -> Result<u64> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .count_records::<livestock_productions::Entity>(
                &context.session(ctx),
                search.as_deref(),
            )
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn livestock_production(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<Option<LivestockProduction>> {
        let context = ctx.data::<GraphQLContext>()?;
        let livestock = context
            .app
            .get_record::<livestock_productions::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(livestock.map(LivestockProduction::from))
    }

    async fn export_livestock_productions(&self, ctx: &Context<'_>) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .export_records::<livestock_productions::Entity>(&context.session(ctx))
            .await
            .map_err(StructuredError::from_core_error)
    }
}
