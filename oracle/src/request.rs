//! Typed requests and responses for driving the oracle from one entry point.

use fakebook_core::UserId;
use serde::Serialize;

use crate::info::{
    AgeInfo, BirthMonthInfo, EventStateInfo, FirstNameInfo, MatchPair, SiblingInfo,
    TaggedPhotoInfo, UserInfo, UsersPair,
};

/// One of the oracle's operations with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    MonthOfBirthInfo,
    NameInfo,
    LonelyUsers,
    LiveAwayFromHome,
    PhotosWithMostTags { num: usize },
    MatchMaker { num: usize, year_diff: u32 },
    SuggestFriends { num: usize },
    EventStates,
    AgeInfo { user_id: UserId },
    PotentialSiblings,
}

impl Request {
    /// Name of the operation answering this request.
    pub fn operation(&self) -> &'static str {
        match self {
            Request::MonthOfBirthInfo => "find_month_of_birth_info",
            Request::NameInfo => "find_name_info",
            Request::LonelyUsers => "lonely_users",
            Request::LiveAwayFromHome => "live_away_from_home",
            Request::PhotosWithMostTags { .. } => "find_photos_with_most_tags",
            Request::MatchMaker { .. } => "match_maker",
            Request::SuggestFriends { .. } => "suggest_friends",
            Request::EventStates => "find_event_states",
            Request::AgeInfo { .. } => "find_age_info",
            Request::PotentialSiblings => "find_potential_siblings",
        }
    }
}

/// The result of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum Response {
    BirthMonths(BirthMonthInfo),
    FirstNames(FirstNameInfo),
    Users(Vec<UserInfo>),
    TaggedPhotos(Vec<TaggedPhotoInfo>),
    Matches(Vec<MatchPair>),
    FriendSuggestions(Vec<UsersPair>),
    EventStates(EventStateInfo),
    Ages(AgeInfo),
    Siblings(Vec<SiblingInfo>),
}
