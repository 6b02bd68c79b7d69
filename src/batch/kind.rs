use std::convert::TryFrom;
use std::fmt;

/// Kind of mutation recorded by a batch entry. The discriminants are the tags
/// written by the engine.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Delete = 0,
    Set = 1,
    Merge = 2,
    LogData = 3,
    SingleDelete = 7,
    RangeDelete = 15,
    SetWithDelete = 18,
    RangeKeyDelete = 19,
    RangeKeyUnset = 20,
    RangeKeySet = 21,
    IngestSST = 22,
    DeleteSized = 23,
}

impl Kind {
    pub const ALL: [Kind; 12] = [
        Kind::Delete,
        Kind::Set,
        Kind::Merge,
        Kind::LogData,
        Kind::SingleDelete,
        Kind::RangeDelete,
        Kind::SetWithDelete,
        Kind::RangeKeyDelete,
        Kind::RangeKeyUnset,
        Kind::RangeKeySet,
        Kind::IngestSST,
        Kind::DeleteSized,
    ];

    /// Whether the entry carries a length prefixed value after its key.
    pub fn has_value(self) -> bool {
        match self {
            Kind::Set
            | Kind::Merge
            | Kind::RangeDelete
            | Kind::RangeKeySet
            | Kind::RangeKeyUnset
            | Kind::RangeKeyDelete
            | Kind::DeleteSized => true,
            Kind::Delete
            | Kind::LogData
            | Kind::SingleDelete
            | Kind::SetWithDelete
            | Kind::IngestSST => false,
        }
    }

    pub fn is_range_key(self) -> bool {
        matches!(
            self,
            Kind::RangeKeySet | Kind::RangeKeyUnset | Kind::RangeKeyDelete
        )
    }

    /// Engine style upper case name, used inside range key spans.
    pub fn short_name(self) -> &'static str {
        match self {
            Kind::Delete => "DEL",
            Kind::Set => "SET",
            Kind::Merge => "MERGE",
            Kind::LogData => "LOGDATA",
            Kind::SingleDelete => "SINGLEDEL",
            Kind::RangeDelete => "RANGEDEL",
            Kind::SetWithDelete => "SETWITHDEL",
            Kind::RangeKeyDelete => "RANGEKEYDEL",
            Kind::RangeKeyUnset => "RANGEKEYUNSET",
            Kind::RangeKeySet => "RANGEKEYSET",
            Kind::IngestSST => "INGESTSST",
            Kind::DeleteSized => "DELSIZED",
        }
    }
}

impl TryFrom<u8> for Kind {
    type Error = u8;
    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| *kind as u8 == tag)
            .ok_or(tag)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::Delete => "Delete",
            Kind::Set => "Set",
            Kind::Merge => "Merge",
            Kind::LogData => "LogData",
            Kind::SingleDelete => "SingleDelete",
            Kind::RangeDelete => "RangeDelete",
            Kind::SetWithDelete => "SetWithDelete",
            Kind::RangeKeyDelete => "RangeKeyDelete",
            Kind::RangeKeyUnset => "RangeKeyUnset",
            Kind::RangeKeySet => "RangeKeySet",
            Kind::IngestSST => "IngestSST",
            Kind::DeleteSized => "DeleteSized",
        };
        f.write_str(name)
    }
}
