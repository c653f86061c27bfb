//! The oracle: typed analytical operations over a relational data source.

use fakebook_core::TableNames;
use fakebook_query::{DataSource, PlanOp, QueryResults};

use crate::config::OracleConfig;
use crate::request::{Request, Response};
use crate::OracleResult;

/// Answers the social-network questions against a [`DataSource`].
///
/// The oracle holds no state besides its source and configuration; every
/// operation takes `&self` and reads a consistent snapshot, so one oracle may
/// serve any number of callers.
pub struct FakebookOracle<S> {
    source: S,
    config: OracleConfig,
}

impl<S: DataSource> FakebookOracle<S> {
    /// Create an oracle reading the default table names.
    pub fn new(source: S) -> Self {
        Self::with_config(source, OracleConfig::default())
    }

    pub fn with_config(source: S, config: OracleConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn tables(&self) -> &TableNames {
        &self.config.tables
    }

    /// Execute a plan under a diagnostic name.
    pub(crate) fn fetch(&self, name: &str, root: PlanOp) -> OracleResult<QueryResults> {
        Ok(self.source.execute(&root.named(name))?)
    }

    /// Run an operation body, logging any failure with the operation name.
    pub(crate) fn boundary<T>(
        &self,
        operation: &'static str,
        body: impl FnOnce() -> OracleResult<T>,
    ) -> OracleResult<T> {
        log::debug!("{} started", operation);
        body().map_err(|err| {
            log::error!("{} failed: {}", operation, err);
            err
        })
    }

    /// Dispatch a request to the matching operation.
    pub fn run(&self, request: &Request) -> OracleResult<Response> {
        Ok(match *request {
            Request::MonthOfBirthInfo => Response::BirthMonths(self.find_month_of_birth_info()?),
            Request::NameInfo => Response::FirstNames(self.find_name_info()?),
            Request::LonelyUsers => Response::Users(self.lonely_users()?),
            Request::LiveAwayFromHome => Response::Users(self.live_away_from_home()?),
            Request::PhotosWithMostTags { num } => {
                Response::TaggedPhotos(self.find_photos_with_most_tags(num)?)
            }
            Request::MatchMaker { num, year_diff } => {
                Response::Matches(self.match_maker(num, year_diff)?)
            }
            Request::SuggestFriends { num } => {
                Response::FriendSuggestions(self.suggest_friends(num)?)
            }
            Request::EventStates => Response::EventStates(self.find_event_states()?),
            Request::AgeInfo { user_id } => Response::Ages(self.find_age_info(user_id)?),
            Request::PotentialSiblings => Response::Siblings(self.find_potential_siblings()?),
        })
    }
}
