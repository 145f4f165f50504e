use crate::graphql_api::api_service::SharedSource;
use async_graphql::{
    Context,
    EmptyMutation,
    EmptySubscription,
    MergedObject,
    Schema,
    SchemaBuilder,
};

pub mod record;

#[derive(MergedObject, Default)]
pub struct Query(record::RecordQuery);

pub type KennelSchema = Schema<Query, EmptyMutation, EmptySubscription>;
pub type KennelSchemaBuilder = SchemaBuilder<Query, EmptyMutation, EmptySubscription>;

pub fn build_schema() -> KennelSchemaBuilder {
    Schema::build(Query::default(), EmptyMutation, EmptySubscription)
}

pub trait SourceProvider {
    /// Returns the record source injected into the schema.
    fn record_source(&self) -> async_graphql::Result<&SharedSource>;
}

impl SourceProvider for Context<'_> {
    fn record_source(&self) -> async_graphql::Result<&SharedSource> {
        self.data::<SharedSource>()
    }
}
