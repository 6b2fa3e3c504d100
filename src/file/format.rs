use num_enum::TryFromPrimitive;

#[doc = r#"
The arrangement of tracks a file declares in its header.

Every format is scanned the same way; the type is informational.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: one track holding every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks played together
    Simultaneous = 1,
    /// Format 2: tracks that are independent patterns
    SequentiallyIndependent = 2,
}

#[test]
fn format_from_header_value() {
    assert_eq!(
        FormatType::try_from(0).ok(),
        Some(FormatType::SingleMultiChannel)
    );
    assert_eq!(FormatType::try_from(1).ok(), Some(FormatType::Simultaneous));
    assert_eq!(
        FormatType::try_from(2).ok(),
        Some(FormatType::SequentiallyIndependent)
    );
    assert!(FormatType::try_from(3).is_err());
}
