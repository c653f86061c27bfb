//! Event statistics.

use fakebook_query::{col, AggregateSpec, DataSource, PlanOp, SortKey};

use crate::info::EventStateInfo;
use crate::relations::{self, leading_ties, texts};
use crate::{FakebookOracle, OracleResult};

impl<S: DataSource> FakebookOracle<S> {
    /// The states hosting the most events, alphabetically, and how many
    /// events each hosts. Events without a city, or in a city without a
    /// state, are not counted.
    pub fn find_event_states(&self) -> OracleResult<EventStateInfo> {
        self.boundary("find_event_states", || {
            let tables = self.tables();
            let states = self.fetch(
                "events_per_state",
                PlanOp::scan(&tables.events, "E")
                    .join(
                        PlanOp::scan(&tables.cities, "C"),
                        vec![(col("E.EVENT_CITY_ID"), col("C.CITY_ID"))],
                    )
                    .filter(col("C.STATE_NAME").is_not_null())
                    .aggregate(
                        vec![("STATE_NAME", col("C.STATE_NAME"))],
                        vec![AggregateSpec::count_star("EVENTS")],
                    )
                    .sort(vec![
                        SortKey::desc(col("EVENTS")),
                        SortKey::asc(col("STATE_NAME")),
                    ]),
            )?;

            let (events, tied) = leading_ties(&states, 1)?;
            Ok(EventStateInfo {
                event_count: relations::count("find_event_states", events)?,
                states: texts(tied)?,
            })
        })
    }
}
