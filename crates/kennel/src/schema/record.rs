use crate::{
    query::{
        AllRecords,
        RecordById,
        Resolver,
    },
    schema::SourceProvider,
    store,
};
use async_graphql::{
    Context,
    Object,
};

pub struct Record(pub(crate) store::Record);

#[Object]
impl Record {
    async fn id(&self) -> u32 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// The breed of the dog.
    async fn category(&self) -> &str {
        &self.0.category
    }

    async fn age(&self) -> u32 {
        self.0.age
    }
}

impl From<store::Record> for Record {
    fn from(value: store::Record) -> Self {
        Self(value)
    }
}

#[derive(Default)]
pub struct RecordQuery;

#[Object]
impl RecordQuery {
    /// Get a single record. Unknown ids resolve to an empty record.
    async fn by_id(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "ID of the record")] id: Option<i32>,
    ) -> async_graphql::Result<Record> {
        let source = ctx.record_source()?;
        let record = RecordById.resolve(source, id)?;
        Ok(record.into())
    }

    /// List of all records.
    async fn list(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Record>> {
        let source = ctx.record_source()?;
        let records = AllRecords.resolve(source, ())?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
