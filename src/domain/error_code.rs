//! Catalog of domain failure codes shared by every service.
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Fixed failure reasons, each with a stable code and a display message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorCode {
    ExistEmail,
    ExistNickname,
    InvalidNicknamePattern,
    NotSamePassword,
    InvalidPasswordPattern,
    InvalidEmailPattern,
    WrongEmailCode,
    WrongEmail,
    NotExistEmail,
    WrongPassword,
    InvalidImage,
    EmptyImageFile,
    NotExistPost,
    NotPostOwner,
    InvalidPostForm,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 15] = [
        Self::ExistEmail,
        Self::ExistNickname,
        Self::InvalidNicknamePattern,
        Self::NotSamePassword,
        Self::InvalidPasswordPattern,
        Self::InvalidEmailPattern,
        Self::WrongEmailCode,
        Self::WrongEmail,
        Self::NotExistEmail,
        Self::WrongPassword,
        Self::InvalidImage,
        Self::EmptyImageFile,
        Self::NotExistPost,
        Self::NotPostOwner,
        Self::InvalidPostForm,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::ExistEmail => "ExistEmail",
            Self::ExistNickname => "ExistNickname",
            Self::InvalidNicknamePattern => "InvalidNicknamePattern",
            Self::NotSamePassword => "NotSamePassword",
            Self::InvalidPasswordPattern => "InvalidPasswordPattern",
            Self::InvalidEmailPattern => "InvalidEmailPattern",
            Self::WrongEmailCode => "WrongEmailCode",
            Self::WrongEmail => "WrongEmail",
            Self::NotExistEmail => "NotExistEmail",
            Self::WrongPassword => "WrongPassword",
            Self::InvalidImage => "InvalidImage",
            Self::EmptyImageFile => "EmptyImageFile",
            Self::NotExistPost => "NotExistPost",
            Self::NotPostOwner => "NotPostOwner",
            Self::InvalidPostForm => "InvalidPostForm",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ExistEmail => "This email is already registered.",
            Self::ExistNickname => "This nickname is already registered.",
            Self::InvalidNicknamePattern => "Nickname must be 2 to 10 characters long.",
            Self::NotSamePassword => "Passwords do not match.",
            Self::InvalidPasswordPattern => {
                "Password must be 8-15 characters and contain at least one upper and lower \
                 case letter, a digit and a special character (@$!%*?&()_)."
            }
            Self::InvalidEmailPattern => "Invalid email format.",
            Self::WrongEmailCode => "Verification code does not match.",
            Self::WrongEmail => "This is not the email the verification was requested for.",
            Self::NotExistEmail => "This email is not registered.",
            Self::WrongPassword => "Please check your password.",
            Self::InvalidImage => "At least one image file is required.",
            Self::EmptyImageFile => "The image file is empty.",
            Self::NotExistPost => "The post does not exist.",
            Self::NotPostOwner => "Only the author can modify this post.",
            Self::InvalidPostForm => "The post form contains invalid values.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ErrorCode", 2)?;
        state.serialize_field("errorCode", self.code())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}
