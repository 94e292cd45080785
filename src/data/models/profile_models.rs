use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::profiles;

pub const DEFAULT_STUDY_FOCUS: &str = "Geral";

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Profile {
    pub user_id: i32,
    pub full_name: String,
    pub study_focus: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = profiles)]
pub struct NewProfile<'a> {
    pub user_id: i32,
    pub full_name: &'a str,
    pub study_focus: &'a str,
    pub updated_at: NaiveDateTime,
}

/// Profile as shown on the settings page
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub full_name: String,
    pub study_focus: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 120))]
    pub full_name: String,
    #[validate(length(max = 120))]
    pub study_focus: String,
}
