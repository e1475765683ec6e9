use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Account status as the console models it.
///
/// The backend reports it either as a numeric code (`1` enabled, `0`
/// disabled) or as an `is_active` flag; both collapse into this enum via
/// [`normalize_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserStatus {
    #[default]
    Enabled,
    Disabled,
}

impl UserStatus {
    pub const ENABLED_CODE: i64 = 1;
    pub const DISABLED_CODE: i64 = 0;

    pub fn code(self) -> i64 {
        match self {
            UserStatus::Enabled => Self::ENABLED_CODE,
            UserStatus::Disabled => Self::DISABLED_CODE,
        }
    }

    /// Any code other than the disabled one counts as enabled.
    pub fn from_code(code: i64) -> Self {
        if code == Self::DISABLED_CODE {
            UserStatus::Disabled
        } else {
            UserStatus::Enabled
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, UserStatus::Enabled)
    }

    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Enabled => "Enable",
            UserStatus::Disabled => "Disable",
        }
    }
}

impl Serialize for UserStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(UserStatus::from_code)
    }
}

/// Collapses the two status representations into one value.
///
/// An explicit status code wins over `is_active`; a record carrying neither
/// is treated as enabled.
pub fn normalize_status(status: Option<i64>, is_active: Option<bool>) -> UserStatus {
    match (status, is_active) {
        (Some(code), _) => UserStatus::from_code(code),
        (None, Some(false)) => UserStatus::Disabled,
        (None, _) => UserStatus::Enabled,
    }
}

/// Primary key of an admin user. Django-style backends return integers,
/// others strings; both must survive a round trip into URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(n) => UserId::Number(n),
            Err(_) => UserId::Text(value.to_string()),
        }
    }
}

/// User record exactly as the API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminUserDto {
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub date_joined: Option<String>,
}

/// Normalized user record used everywhere past the service layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminUser {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    pub status: UserStatus,
    pub date_joined: Option<String>,
}

impl From<AdminUserDto> for AdminUser {
    fn from(dto: AdminUserDto) -> Self {
        AdminUser {
            status: normalize_status(dto.status, dto.is_active),
            id: dto.id,
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            avatar: dto.avatar,
            date_joined: dto.date_joined,
        }
    }
}

impl<'de> Deserialize<'de> for AdminUser {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AdminUserDto::deserialize(deserializer).map(AdminUser::from)
    }
}

impl AdminUser {
    /// "First Last", or `None` when both parts are blank.
    pub fn full_name(&self) -> Option<String> {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Query string of `GET /admin/users/`. `None` fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminUserListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

/// Body of create (POST) and update (PATCH) requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminUserPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status: UserStatus,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AdminUserPayload {
    /// `is_active` is always derived from `status`, never set independently.
    pub fn new(
        email: String,
        first_name: String,
        last_name: String,
        status: UserStatus,
        password: Option<String>,
    ) -> Self {
        Self {
            email,
            first_name,
            last_name,
            is_active: status.is_active(),
            status,
            password,
        }
    }
}
