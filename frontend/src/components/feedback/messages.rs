use common::feed::{RatingFilter, RoleFilter};
use common::model::review::{Review, Role};
use common::submit::CategoryField;

pub enum Msg {
    // Sync loader
    PageLoaded(Vec<Review>),
    LoadFinished,
    LoadFailed(String),
    RealtimeInsert(Review),
    // Form fields
    NameInput(String),
    RoleSelected(Role),
    RatingSelected(u8),
    ExperienceInput(String),
    ReliabilitySelected(u8),
    RecommendSelected(bool),
    CategoryInput(CategoryField, String),
    // Form flow
    NextStep,
    PrevStep,
    Submit,
    Submitted(Review),
    SubmitFailed(String),
    CelebrationDone,
    // Review list
    SetRoleFilter(RoleFilter),
    SetRatingFilter(RatingFilter),
    RevealMore,
}
