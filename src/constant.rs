use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// RETS element names recognised by the decoder
pub const TAG_RETS: &str = "RETS";
pub const TAG_RETS_STATUS: &str = "RETS-STATUS";
pub const TAG_RETS_RESPONSE: &str = "RETS-RESPONSE";
pub const TAG_DELIMITER: &str = "DELIMITER";
pub const TAG_COLUMNS: &str = "COLUMNS";
pub const TAG_DATA: &str = "DATA";
pub const TAG_COUNT: &str = "COUNT";
pub const TAG_MAXROWS: &str = "MAXROWS";

/// Attribute names
pub const ATTR_REPLY_CODE: &str = "ReplyCode";
pub const ATTR_REPLY_TEXT: &str = "ReplyText";
pub const ATTR_VALUE: &str = "value";
pub const ATTR_RECORDS: &str = "Records";

/// Field separator used until a DELIMITER element says otherwise
pub const DEFAULT_DELIMITER: u8 = b'\t';

pub const REPLY_CODE_SUCCESS: &str = "0";
pub const REPLY_CODE_NO_RECORDS_FOUND: &str = "20201";
pub const REPLY_CODE_MAX_RECORDS_EXCEEDED: &str = "20208";

/// Symbolic label of a RETS reply code
///
/// Several codes share a label across transactions (e.g. `20400` and `20500` are both
/// `INVALID_RESOURCE`), so a label alone does not identify a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyTag {
    OperationSuccessful,
    // Login
    ZeroBalance,
    BrokerCodeRequired,
    BrokerCodeInvalid,
    DuplicateLoginProhibited,
    UserAgentAuthenticationRequired,
    AdditionalLoginNotPermitted,
    MiscellaneousLoginError,
    ClientPasswordInvalid,
    ServerTemporarilyDisabled,
    ServerError,
    InsecurePasswordDisallowed,
    DuplicatePasswordDisallowed,
    EncryptedUsernameInvalid,
    // Search
    UnknownQueryField,
    NoRecordsFound,
    InvalidSelect,
    MiscellaneousSearchError,
    InvalidQuerySyntax,
    UnauthorizedQuery,
    MaxRecordsExceeded,
    Timeout,
    TooManyActiveQueries,
    QueryTooComplex,
    InvalidKeyRequest,
    InvalidKey,
    // Session
    NotLoggedIn,
    // GetObject / GetMetadata
    InvalidResource,
    InvalidType,
    InvalidIdentifier,
    NoObjectFound,
    UnsupportedMimeType,
    UnauthorizedRetrieval,
    ResourceUnavailable,
    ObjectUnavailable,
    RequestTooLarge,
    TooManyActiveRequests,
    MiscellaneousError,
    NoMetadataFound,
    MetadataUnavailable,
    RequestedDtdUnavailable,
    // Logout
    MiscellaneousLogoutError,
    // Update
    IllegalUpdateAction,
    UnauthorizedUpdate,
    UnknownUpdateField,
    InvalidUpdateValue,
    UpdateFailed,
    Unknown,
}

impl ReplyTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OperationSuccessful => "OPERATION_SUCCESSFUL",
            Self::ZeroBalance => "ZERO_BALANCE",
            Self::BrokerCodeRequired => "BROKER_CODE_REQUIRED",
            Self::BrokerCodeInvalid => "BROKER_CODE_INVALID",
            Self::DuplicateLoginProhibited => "DUPLICATE_LOGIN_PROHIBITED",
            Self::UserAgentAuthenticationRequired => "USER_AGENT_AUTHENTICATION_REQUIRED",
            Self::AdditionalLoginNotPermitted => "ADDITIONAL_LOGIN_NOT_PERMITTED",
            Self::MiscellaneousLoginError => "MISCELLANEOUS_LOGIN_ERROR",
            Self::ClientPasswordInvalid => "CLIENT_PASSWORD_INVALID",
            Self::ServerTemporarilyDisabled => "SERVER_TEMPORARILY_DISABLED",
            Self::ServerError => "SERVER_ERROR",
            Self::InsecurePasswordDisallowed => "INSECURE_PASSWORD_DISALLOWED",
            Self::DuplicatePasswordDisallowed => "DUPLICATE_PASSWORD_DISALLOWED",
            Self::EncryptedUsernameInvalid => "ENCRYPTED_USERNAME_INVALID",
            Self::UnknownQueryField => "UNKNOWN_QUERY_FIELD",
            Self::NoRecordsFound => "NO_RECORDS_FOUND",
            Self::InvalidSelect => "INVALID_SELECT",
            Self::MiscellaneousSearchError => "MISCELLANEOUS_SEARCH_ERROR",
            Self::InvalidQuerySyntax => "INVALID_QUERY_SYNTAX",
            Self::UnauthorizedQuery => "UNAUTHORIZED_QUERY",
            Self::MaxRecordsExceeded => "MAX_RECORDS_EXCEEDED",
            Self::Timeout => "TIMEOUT",
            Self::TooManyActiveQueries => "TOO_MANY_ACTIVE_QUERIES",
            Self::QueryTooComplex => "QUERY_TOO_COMPLEX",
            Self::InvalidKeyRequest => "INVALID_KEY_REQUEST",
            Self::InvalidKey => "INVALID_KEY",
            Self::NotLoggedIn => "NOT_LOGGED_IN",
            Self::InvalidResource => "INVALID_RESOURCE",
            Self::InvalidType => "INVALID_TYPE",
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::NoObjectFound => "NO_OBJECT_FOUND",
            Self::UnsupportedMimeType => "UNSUPPORTED_MIME_TYPE",
            Self::UnauthorizedRetrieval => "UNAUTHORIZED_RETRIEVAL",
            Self::ResourceUnavailable => "RESOURCE_UNAVAILABLE",
            Self::ObjectUnavailable => "OBJECT_UNAVAILABLE",
            Self::RequestTooLarge => "REQUEST_TOO_LARGE",
            Self::TooManyActiveRequests => "TOO_MANY_ACTIVE_REQUESTS",
            Self::MiscellaneousError => "MISCELLANEOUS_ERROR",
            Self::NoMetadataFound => "NO_METADATA_FOUND",
            Self::MetadataUnavailable => "METADATA_UNAVAILABLE",
            Self::RequestedDtdUnavailable => "REQUESTED_DTD_UNAVAILABLE",
            Self::MiscellaneousLogoutError => "MISCELLANEOUS_LOGOUT_ERROR",
            Self::IllegalUpdateAction => "ILLEGAL_UPDATE_ACTION",
            Self::UnauthorizedUpdate => "UNAUTHORIZED_UPDATE",
            Self::UnknownUpdateField => "UNKNOWN_UPDATE_FIELD",
            Self::InvalidUpdateValue => "INVALID_UPDATE_VALUE",
            Self::UpdateFailed => "UPDATE_FAILED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Look up the label of a literal reply code.
    ///
    /// Codes are matched verbatim, so `"020201"` is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        REPLY_TAGS.get(code).copied().unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for ReplyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const REPLY_CODES: &[(&str, ReplyTag)] = &[
    ("0", ReplyTag::OperationSuccessful),
    ("20003", ReplyTag::ZeroBalance),
    ("20004", ReplyTag::BrokerCodeRequired),
    ("20005", ReplyTag::BrokerCodeInvalid),
    ("20006", ReplyTag::DuplicateLoginProhibited),
    ("20012", ReplyTag::UserAgentAuthenticationRequired),
    ("20022", ReplyTag::AdditionalLoginNotPermitted),
    ("20036", ReplyTag::MiscellaneousLoginError),
    ("20037", ReplyTag::ClientPasswordInvalid),
    ("20041", ReplyTag::ServerTemporarilyDisabled),
    ("20050", ReplyTag::ServerError),
    ("20140", ReplyTag::InsecurePasswordDisallowed),
    ("20141", ReplyTag::DuplicatePasswordDisallowed),
    ("20142", ReplyTag::EncryptedUsernameInvalid),
    ("20200", ReplyTag::UnknownQueryField),
    ("20201", ReplyTag::NoRecordsFound),
    ("20202", ReplyTag::InvalidSelect),
    ("20203", ReplyTag::MiscellaneousSearchError),
    ("20206", ReplyTag::InvalidQuerySyntax),
    ("20207", ReplyTag::UnauthorizedQuery),
    ("20208", ReplyTag::MaxRecordsExceeded),
    ("20209", ReplyTag::Timeout),
    ("20210", ReplyTag::TooManyActiveQueries),
    ("20211", ReplyTag::QueryTooComplex),
    ("20212", ReplyTag::InvalidKeyRequest),
    ("20213", ReplyTag::InvalidKey),
    ("20301", ReplyTag::InvalidIdentifier),
    ("20302", ReplyTag::NotLoggedIn),
    ("20400", ReplyTag::InvalidResource),
    ("20401", ReplyTag::InvalidType),
    ("20402", ReplyTag::InvalidIdentifier),
    ("20403", ReplyTag::NoObjectFound),
    ("20406", ReplyTag::UnsupportedMimeType),
    ("20407", ReplyTag::UnauthorizedRetrieval),
    ("20408", ReplyTag::ResourceUnavailable),
    ("20409", ReplyTag::ObjectUnavailable),
    ("20410", ReplyTag::RequestTooLarge),
    ("20411", ReplyTag::Timeout),
    ("20412", ReplyTag::TooManyActiveRequests),
    ("20413", ReplyTag::MiscellaneousError),
    ("20500", ReplyTag::InvalidResource),
    ("20501", ReplyTag::InvalidType),
    ("20502", ReplyTag::InvalidIdentifier),
    ("20503", ReplyTag::NoMetadataFound),
    ("20506", ReplyTag::UnsupportedMimeType),
    ("20507", ReplyTag::UnauthorizedRetrieval),
    ("20508", ReplyTag::ResourceUnavailable),
    ("20509", ReplyTag::MetadataUnavailable),
    ("20510", ReplyTag::RequestTooLarge),
    ("20511", ReplyTag::Timeout),
    ("20512", ReplyTag::TooManyActiveRequests),
    ("20513", ReplyTag::MiscellaneousError),
    ("20514", ReplyTag::RequestedDtdUnavailable),
    ("20701", ReplyTag::NotLoggedIn),
    ("20702", ReplyTag::MiscellaneousLogoutError),
    ("20900", ReplyTag::IllegalUpdateAction),
    ("20901", ReplyTag::UnauthorizedUpdate),
    ("20902", ReplyTag::UnknownUpdateField),
    ("20903", ReplyTag::InvalidUpdateValue),
    ("20904", ReplyTag::UpdateFailed),
];

/// Reply code → label, built once per process and never mutated.
pub static REPLY_TAGS: LazyLock<HashMap<&'static str, ReplyTag>> =
    LazyLock::new(|| REPLY_CODES.iter().copied().collect());
