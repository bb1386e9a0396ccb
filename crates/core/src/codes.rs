//! Integer-coded enumerations exchanged with the lab backend.
//!
//! Every code enum serializes as its bare integer (`#[serde(try_from,
//! into)]`) and exposes a human-readable label for table display. Unknown
//! integers are rejected with [`CoreError::Validation`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Generates `code()`, `label()`, `ALL`, and the `i32` conversions for a
/// fieldless code enum.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The integer stored by the backend.
            pub fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Display label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = CoreError;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(CoreError::Validation(format!(
                        "Unknown {} code: {other}",
                        $what
                    ))),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.code()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

code_enum! {
    /// Account role of a lab user.
    Identity, "identity" {
        Admin = 1 => "Administrator",
        Teacher = 2 => "Teacher",
        Student = 3 => "Student",
    }
}

code_enum! {
    /// Academic rank of a lab member.
    AcademicStatus, "academic status" {
        LabDirector = 0 => "Lab director",
        Professor = 1 => "Professor",
        AssociateProfessor = 2 => "Associate professor",
        Lecturer = 3 => "Lecturer",
        PhdStudent = 4 => "PhD student",
        MasterStudent = 5 => "Master student",
        Undergraduate = 6 => "Undergraduate",
    }
}

code_enum! {
    Gender, "gender" {
        Unknown = 0 => "Unknown",
        Male = 1 => "Male",
        Female = 2 => "Female",
    }
}

code_enum! {
    /// Whether a member is still with the lab.
    MemberStatus, "member status" {
        Active = 1 => "Active",
        Departed = 2 => "Departed",
    }
}

code_enum! {
    /// Top-level achievement discriminator (`type` on the wire).
    AchievementKind, "achievement kind" {
        Paper = 1 => "Paper",
        Project = 2 => "Project",
    }
}

code_enum! {
    PaperType, "paper type" {
        Journal = 1 => "Journal article",
        Conference = 2 => "Conference paper",
        Preprint = 3 => "Preprint",
        Patent = 4 => "Patent",
        SoftwareCopyright = 5 => "Software copyright",
        Standard = 6 => "Standard",
        Monograph = 7 => "Monograph",
    }
}

code_enum! {
    ProjectType, "project type" {
        Industry = 1 => "Industry collaboration",
        NsfcGeneral = 2 => "NSFC general program",
        NsfcYouth = 3 => "NSFC young scientists",
        MunicipalEducation = 4 => "Municipal education commission",
        NationalTeachingReform = 5 => "National teaching reform",
        ProvincialTeachingReform = 6 => "Provincial teaching reform",
        OtherTeachingReform = 7 => "Other teaching reform",
        OtherGovernment = 8 => "Other government-funded",
    }
}

code_enum! {
    NewsType, "news type" {
        News = 1 => "News",
        Event = 2 => "Event",
        Notice = 3 => "Notice",
    }
}

code_enum! {
    NewsStatus, "news status" {
        Published = 1 => "Published",
        Draft = 2 => "Draft",
    }
}

impl MemberStatus {
    /// Status wording depends on who the member is: students enroll and
    /// graduate, teachers are employed and leave.
    pub fn label_for(self, identity: Option<Identity>) -> &'static str {
        match (identity, self) {
            (Some(Identity::Student), Self::Active) => "Enrolled",
            (Some(Identity::Student), Self::Departed) => "Graduated",
            (Some(Identity::Teacher), Self::Active) => "Employed",
            (Some(Identity::Teacher), Self::Departed) => "Left",
            (_, Self::Active) => "Enrolled/Employed",
            (_, Self::Departed) => "Graduated/Left",
        }
    }
}
