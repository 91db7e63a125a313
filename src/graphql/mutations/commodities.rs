use async_graphql::*;

use crate::app_context::RecordPayload;
use crate::database::entities::{biosecurity_commodities, commodity_prices};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{
    BiosecurityCommodity, BiosecurityCommodityInput, CommodityPrice, CommodityPriceInput,
    ImportResult,
};

#[derive(Default)]
pub struct CommodityMutation;

#[Object]
impl CommodityMutation {
    async fn create_biosecurity_commodity(
        &self,
        ctx: &Context<'_>,
        input: BiosecurityCommodityInput,
    ) -> Result<BiosecurityCommodity> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let commodity = context
            .app
            .create_record::<biosecurity_commodities::Entity>(&context.session(ctx), payload)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(BiosecurityCommodity::from(commodity))
    }

    async fn update_biosecurity_commodity(
        &self,
        ctx: &Context<'_>,
        uuid: String,
        input: BiosecurityCommodityInput,
    ) -> Result<BiosecurityCommodity> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let commodity = context
            .app
            .update_record::<biosecurity_commodities::Entity>(
                &context.session(ctx),
                Some(uuid.as_str()),
                payload,
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(BiosecurityCommodity::from(commodity))
    }

    async fn delete_biosecurity_commodity(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<BiosecurityCommodity> {
        let context = ctx.data::<GraphQLContext>()?;
        let commodity = context
            .app
            .delete_record::<biosecurity_commodities::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(BiosecurityCommodity::from(commodity))
    }

    async fn tokenized_create_biosecurity_commodity(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<BiosecurityCommodity> {
        let context = ctx.data::<GraphQLContext>()?;
        let commodity = context
            .app
            .create_record::<biosecurity_commodities::Entity>(
                &context.session(ctx),
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(BiosecurityCommodity::from(commodity))
    }

    async fn tokenized_update_biosecurity_commodity(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<BiosecurityCommodity> {
        let context = ctx.data::<GraphQLContext>()?;
        let commodity = context
            .app
            .update_record::<biosecurity_commodities::Entity>(
                &context.session(ctx),
                None,
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(BiosecurityCommodity::from(commodity))
    }

    async fn tokenized_delete_biosecurity_commodity(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<BiosecurityCommodity> {
        let context = ctx.data::<GraphQLContext>()?;
        let commodity = context
            .app
            .tokenized_delete_record::<biosecurity_commodities::Entity>(&context.session(ctx), &token)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(BiosecurityCommodity::from(commodity))
    }

    async fn import_biosecurity_commodities(
        &self,
        ctx: &Context<'_>,
        file: String,
    ) -> Result<ImportResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let summary = context
            .app
            .import_records::<biosecurity_commodities::Entity>(&context.session(ctx), &file)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(ImportResult::from(summary))
    }

    async fn create_commodity_price(
        &self,
        ctx: &Context<'_>,
        input: CommodityPriceInput,
    ) -> Result<CommodityPrice> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let price = context
            .app
            .create_record::<commodity_prices::Entity>(&context.session(ctx), payload)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CommodityPrice::from(price))
    }

    async fn update_commodity_price(
        &self,
        ctx: &Context<'_>,
        uuid: String,
        input: CommodityPriceInput,
    ) -> Result<CommodityPrice> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let price = context
            .app
            .update_record::<commodity_prices::Entity>(
                &context.session(ctx),
                Some(uuid.as_str()),
                payload,
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CommodityPrice::from(price))
    }

    async fn delete_commodity_price(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<CommodityPrice> {
        let context = ctx.data::<GraphQLContext>()?;
        let price = context
            .app
            .delete_record::<commodity_prices::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CommodityPrice::from(price))
    }

    async fn tokenized_create_commodity_price(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CommodityPrice> {
        let context = ctx.data::<GraphQLContext>()?;
        let price = context
            .app
            .create_record::<commodity_prices::Entity>(
                &context.session(ctx),
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CommodityPrice::from(price))
    }

    async fn tokenized_update_commodity_price(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CommodityPrice> {
        let context = ctx.data::<GraphQLContext>()?;
        let price = context
            .app
            .update_record::<commodity_prices::Entity>(
                &context.session(ctx),
                None,
                RecordPayload::Tokenized(token),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CommodityPrice::from(price))
    }

    async fn tokenized_delete_commodity_price(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> Result<CommodityPrice> {
        let context = ctx.data::<GraphQLContext>()?;
        let price = context
            .app
            .tokenized_delete_record::<commodity_prices::Entity>(&context.session(ctx), &token)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(CommodityPrice::from(price))
    }

    async fn import_commodity_prices(
        &self,
        ctx: &Context<'_>,
        file: String,
    ) -> Result<ImportResult> {
        let context = ctx.data::<GraphQLContext>()?;
        let summary = context
            .app
            .import_records::<commodity_prices::Entity>(&context.session(ctx), &file)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(ImportResult::from(summary))
    }
}
