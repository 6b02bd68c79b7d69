use crate::batch::{Entry, Kind};
use crate::format::FormatterConfig;
use crate::rangekey;
use crate::varint;

/// Render one entry as `Kind(payload)`. `seq_num` is the sequence number
/// implied by the entry's position in its batch; it is only used to label
/// range keys.
pub fn format_entry(config: &FormatterConfig, seq_num: u64, entry: &Entry) -> String {
    let fmt_key = |k: &[u8]| config.key.format(k);
    let key = &entry.key[..];
    let value = entry.value_or_empty();

    let payload = match entry.kind {
        Kind::Delete | Kind::SingleDelete | Kind::SetWithDelete => fmt_key(key),
        Kind::Set | Kind::Merge => format!("{},{}", fmt_key(key), config.value.format(key, value)),
        Kind::LogData => format!("<{}>", value.len()),
        Kind::IngestSST => varint::uvarint(key).to_string(),
        Kind::RangeDelete => format!("{},{}", fmt_key(key), fmt_key(value)),
        Kind::RangeKeySet | Kind::RangeKeyUnset | Kind::RangeKeyDelete => {
            let span = rangekey::decode(
                entry.kind,
                entry.key.clone(),
                seq_num,
                entry.value.clone().unwrap_or_default(),
            );
            match span {
                Ok(span) => span.pretty(fmt_key),
                Err(err) => format!("{}: error decoding {}", fmt_key(key), err),
            }
        }
        Kind::DeleteSized => format!("{},{}", fmt_key(key), varint::uvarint(value)),
    };

    format!("{}({})", entry.kind, payload)
}
