mod ids;
mod setting;
mod user;

pub use ids::UserId;
pub use setting::{Appearance, LocalSetting, LocalSettingPatch, UserSetting, Visibility};
pub use user::{RawSettingEntry, Role, SessionView, User, UserDelete, UserPatch};
