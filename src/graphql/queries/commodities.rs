use async_graphql::*;

use crate::database::entities::{biosecurity_commodities, commodity_prices};
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{BiosecurityCommodity, CommodityPrice};
use crate::services::ListQuery;

#[derive(Default)]
pub struct CommodityQuery;

#[Object]
impl CommodityQuery {
    async fn all_biosecurity_commodities(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<Vec<BiosecurityCommodity>> {
        let context = ctx.data::<GraphQLContext>()?;
        let commodities = context
            .app
            .list_records::<biosecurity_commodities::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(commodities
            .into_iter()
            .map(BiosecurityCommodity::from)
            .collect())
    }

    async fn tokenized_all_biosecurity_commodities(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .tokenized_list_records::<biosecurity_commodities::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn count_biosecurity_commodities(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
    ) -> Result<u64> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .count_records::<biosecurity_commodities::Entity>(
                &context.session(ctx),
                search.as_deref(),
            )
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn biosecurity_commodity(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<Option<BiosecurityCommodity>> {
        let context = ctx.data::<GraphQLContext>()?;
        let commodity = context
            .app
            .get_record::<biosecurity_commodities::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(commodity.map(BiosecurityCommodity::from))
    }

    async fn export_biosecurity_commodities(&self, ctx: &Context<'_>) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .export_records::<biosecurity_commodities::Entity>(&context.session(ctx))
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn all_commodity_prices(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<Vec<CommodityPrice>> {
        let context = ctx.data::<GraphQLContext>()?;
        let prices = context
            .app
            .list_records::<commodity_prices::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(prices.into_iter().map(CommodityPrice::from).collect())
    }

    async fn tokenized_all_commodity_prices(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .tokenized_list_records::<commodity_prices::Entity>(
                &context.session(ctx),
                &ListQuery::new(skip, take, search),
            )
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn count_commodity_prices(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
    ) -> Result<u64> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .count_records::<commodity_prices::Entity>(&context.session(ctx), search.as_deref())
            .await
            .map_err(StructuredError::from_core_error)
    }

    async fn commodity_price(
        &self,
        ctx: &Context<'_>,
        uuid: String,
    ) -> Result<Option<CommodityPrice>> {
        let context = ctx.data::<GraphQLContext>()?;
        let price = context
            .app
            .get_record::<commodity_prices::Entity>(&context.session(ctx), &uuid)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(price.map(CommodityPrice::from))
    }

    async fn export_commodity_prices(&self, ctx: &Context<'_>) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .export_records::<commodity_prices::Entity>(&context.session(ctx))
            .await
            .map_err(StructuredError::from_core_error)
    }
}
