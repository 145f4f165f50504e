use crate::{
    ports::RecordSource,
    store::Record,
};

/// Produces the value of one schema field from its arguments and the
/// shared record source.
pub trait Resolver {
    type Arguments;
    type Output;

    fn resolve(
        &self,
        source: &dyn RecordSource,
        arguments: Self::Arguments,
    ) -> anyhow::Result<Self::Output>;
}

/// Looks a record up by its id.
///
/// A missing id, an id that can't name an unsigned record id, or an id
/// without a match all resolve to `Record::default()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordById;

impl Resolver for RecordById {
    type Arguments = Option<i32>;
    type Output = Record;

    fn resolve(
        &self,
        source: &dyn RecordSource,
        id: Option<i32>,
    ) -> anyhow::Result<Record> {
        let Some(id) = id.and_then(|id| u32::try_from(id).ok()) else {
            return Ok(Record::default())
        };

        let record = source
            .records()
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .unwrap_or_default();

        Ok(record)
    }
}

/// Returns every record in store order.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllRecords;

impl Resolver for AllRecords {
    type Arguments = ();
    type Output = Vec<Record>;

    fn resolve(&self, source: &dyn RecordSource, _: ()) -> anyhow::Result<Vec<Record>> {
        Ok(source.records().to_vec())
    }
}
