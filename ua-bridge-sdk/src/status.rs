use std::fmt::{Display, Formatter};

/// Numeric outcome of a store operation.
///
/// Codes never cross the protocol boundary as integers; callers only ever
/// see the textual mnemonic from [`StatusCode::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const GOOD: StatusCode = StatusCode(0x0000_0000);

    pub const BAD_UNEXPECTED_ERROR: StatusCode = StatusCode(0x8001_0000);
    pub const BAD_INTERNAL_ERROR: StatusCode = StatusCode(0x8002_0000);
    pub const BAD_OUT_OF_MEMORY: StatusCode = StatusCode(0x8003_0000);
    pub const BAD_TIMEOUT: StatusCode = StatusCode(0x800A_0000);
    pub const BAD_SERVICE_UNSUPPORTED: StatusCode = StatusCode(0x800B_0000);
    pub const BAD_COMMUNICATION_ERROR: StatusCode = StatusCode(0x8005_0000);
    pub const BAD_ENCODING_ERROR: StatusCode = StatusCode(0x8006_0000);
    pub const BAD_DECODING_ERROR: StatusCode = StatusCode(0x8007_0000);
    pub const BAD_NOT_READABLE: StatusCode = StatusCode(0x803A_0000);
    pub const BAD_NOT_WRITABLE: StatusCode = StatusCode(0x803B_0000);
    pub const BAD_OUT_OF_RANGE: StatusCode = StatusCode(0x803C_0000);
    pub const BAD_NOT_SUPPORTED: StatusCode = StatusCode(0x803D_0000);
    pub const BAD_NOT_FOUND: StatusCode = StatusCode(0x803E_0000);
    pub const BAD_NODE_ID_INVALID: StatusCode = StatusCode(0x8033_0000);
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8034_0000);
    pub const BAD_ATTRIBUTE_ID_INVALID: StatusCode = StatusCode(0x8035_0000);
    pub const BAD_INDEX_RANGE_INVALID: StatusCode = StatusCode(0x8036_0000);
    pub const BAD_INDEX_RANGE_NO_DATA: StatusCode = StatusCode(0x8037_0000);
    pub const BAD_DATA_ENCODING_INVALID: StatusCode = StatusCode(0x8038_0000);
    pub const BAD_DATA_ENCODING_UNSUPPORTED: StatusCode = StatusCode(0x8039_0000);
    pub const BAD_NODE_CLASS_INVALID: StatusCode = StatusCode(0x805F_0000);
    pub const BAD_BROWSE_NAME_INVALID: StatusCode = StatusCode(0x8060_0000);
    pub const BAD_BROWSE_NAME_DUPLICATED: StatusCode = StatusCode(0x8061_0000);
    pub const BAD_NODE_ATTRIBUTES_INVALID: StatusCode = StatusCode(0x8062_0000);
    pub const BAD_TYPE_DEFINITION_INVALID: StatusCode = StatusCode(0x8063_0000);
    pub const BAD_SOURCE_NODE_ID_INVALID: StatusCode = StatusCode(0x8064_0000);
    pub const BAD_TARGET_NODE_ID_INVALID: StatusCode = StatusCode(0x8065_0000);
    pub const BAD_DUPLICATE_REFERENCE_NOT_ALLOWED: StatusCode = StatusCode(0x8066_0000);
    pub const BAD_NO_DELETE_RIGHTS: StatusCode = StatusCode(0x8069_0000);
    pub const BAD_SERVER_INDEX_INVALID: StatusCode = StatusCode(0x806A_0000);
    pub const BAD_VIEW_ID_UNKNOWN: StatusCode = StatusCode(0x806B_0000);
    pub const BAD_TYPE_MISMATCH: StatusCode = StatusCode(0x8074_0000);
    pub const BAD_SUBSCRIPTION_ID_INVALID: StatusCode = StatusCode(0x8028_0000);
    pub const BAD_MONITORED_ITEM_ID_INVALID: StatusCode = StatusCode(0x8042_0000);
    pub const BAD_MONITORED_ITEM_FILTER_INVALID: StatusCode = StatusCode(0x8043_0000);
    pub const BAD_NODE_ID_EXISTS: StatusCode = StatusCode(0x805E_0000);
    pub const BAD_REFERENCE_TYPE_ID_INVALID: StatusCode = StatusCode(0x8067_0000);
    pub const BAD_REFERENCE_NOT_ALLOWED: StatusCode = StatusCode(0x8068_0000);
    pub const BAD_PARENT_NODE_ID_INVALID: StatusCode = StatusCode(0x805B_0000);
    pub const BAD_WRITE_NOT_SUPPORTED: StatusCode = StatusCode(0x8073_0000);
    pub const BAD_CONNECTION_CLOSED: StatusCode = StatusCode(0x80AE_0000);
    pub const BAD_INVALID_ARGUMENT: StatusCode = StatusCode(0x80AB_0000);
    pub const BAD_DISCONNECT: StatusCode = StatusCode(0x80AD_0000);
    pub const BAD_SESSION_ID_INVALID: StatusCode = StatusCode(0x8025_0000);
    pub const BAD_SESSION_CLOSED: StatusCode = StatusCode(0x8026_0000);

    #[inline]
    pub const fn is_good(&self) -> bool {
        self.0 == 0
    }

    /// Textual mnemonic for this code.
    ///
    /// Stable contract: code 0 is always "Good" and no failing code maps to
    /// the same mnemonic. Codes outside the table degrade to a fixed
    /// "Unknown StatusCode" marker instead of leaking the raw integer.
    pub const fn name(&self) -> &'static str {
        match *self {
            StatusCode::GOOD => "Good",
            StatusCode::BAD_UNEXPECTED_ERROR => "BadUnexpectedError",
            StatusCode::BAD_INTERNAL_ERROR => "BadInternalError",
            StatusCode::BAD_OUT_OF_MEMORY => "BadOutOfMemory",
            StatusCode::BAD_TIMEOUT => "BadTimeout",
            StatusCode::BAD_SERVICE_UNSUPPORTED => "BadServiceUnsupported",
            StatusCode::BAD_COMMUNICATION_ERROR => "BadCommunicationError",
            StatusCode::BAD_ENCODING_ERROR => "BadEncodingError",
            StatusCode::BAD_DECODING_ERROR => "BadDecodingError",
            StatusCode::BAD_NOT_READABLE => "BadNotReadable",
            StatusCode::BAD_NOT_WRITABLE => "BadNotWritable",
            StatusCode::BAD_OUT_OF_RANGE => "BadOutOfRange",
            StatusCode::BAD_NOT_SUPPORTED => "BadNotSupported",
            StatusCode::BAD_NOT_FOUND => "BadNotFound",
            StatusCode::BAD_NODE_ID_INVALID => "BadNodeIdInvalid",
            StatusCode::BAD_NODE_ID_UNKNOWN => "BadNodeIdUnknown",
            StatusCode::BAD_ATTRIBUTE_ID_INVALID => "BadAttributeIdInvalid",
            StatusCode::BAD_INDEX_RANGE_INVALID => "BadIndexRangeInvalid",
            StatusCode::BAD_INDEX_RANGE_NO_DATA => "BadIndexRangeNoData",
            StatusCode::BAD_DATA_ENCODING_INVALID => "BadDataEncodingInvalid",
            StatusCode::BAD_DATA_ENCODING_UNSUPPORTED => "BadDataEncodingUnsupported",
            StatusCode::BAD_NODE_CLASS_INVALID => "BadNodeClassInvalid",
            StatusCode::BAD_BROWSE_NAME_INVALID => "BadBrowseNameInvalid",
            StatusCode::BAD_BROWSE_NAME_DUPLICATED => "BadBrowseNameDuplicated",
            StatusCode::BAD_NODE_ATTRIBUTES_INVALID => "BadNodeAttributesInvalid",
            StatusCode::BAD_TYPE_DEFINITION_INVALID => "BadTypeDefinitionInvalid",
            StatusCode::BAD_SOURCE_NODE_ID_INVALID => "BadSourceNodeIdInvalid",
            StatusCode::BAD_TARGET_NODE_ID_INVALID => "BadTargetNodeIdInvalid",
            StatusCode::BAD_DUPLICATE_REFERENCE_NOT_ALLOWED => "BadDuplicateReferenceNotAllowed",
            StatusCode::BAD_NO_DELETE_RIGHTS => "BadNoDeleteRights",
            StatusCode::BAD_SERVER_INDEX_INVALID => "BadServerIndexInvalid",
            StatusCode::BAD_VIEW_ID_UNKNOWN => "BadViewIdUnknown",
            StatusCode::BAD_TYPE_MISMATCH => "BadTypeMismatch",
            StatusCode::BAD_SUBSCRIPTION_ID_INVALID => "BadSubscriptionIdInvalid",
            StatusCode::BAD_MONITORED_ITEM_ID_INVALID => "BadMonitoredItemIdInvalid",
            StatusCode::BAD_MONITORED_ITEM_FILTER_INVALID => "BadMonitoredItemFilterInvalid",
            StatusCode::BAD_NODE_ID_EXISTS => "BadNodeIdExists",
            StatusCode::BAD_REFERENCE_TYPE_ID_INVALID => "BadReferenceTypeIdInvalid",
            StatusCode::BAD_REFERENCE_NOT_ALLOWED => "BadReferenceNotAllowed",
            StatusCode::BAD_PARENT_NODE_ID_INVALID => "BadParentNodeIdInvalid",
            StatusCode::BAD_WRITE_NOT_SUPPORTED => "BadWriteNotSupported",
            StatusCode::BAD_CONNECTION_CLOSED => "BadConnectionClosed",
            StatusCode::BAD_INVALID_ARGUMENT => "BadInvalidArgument",
            StatusCode::BAD_DISCONNECT => "BadDisconnect",
            StatusCode::BAD_SESSION_ID_INVALID => "BadSessionIdInvalid",
            StatusCode::BAD_SESSION_CLOSED => "BadSessionClosed",
            _ => "Unknown StatusCode",
        }
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<u32> for StatusCode {
    fn from(raw: u32) -> Self {
        StatusCode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_mnemonic_is_stable() {
        assert_eq!(StatusCode::GOOD.name(), "Good");
        assert!(StatusCode::GOOD.is_good());
    }

    #[test]
    fn failing_codes_never_read_good() {
        let failing = [
            StatusCode::BAD_TYPE_MISMATCH,
            StatusCode::BAD_NODE_ID_UNKNOWN,
            StatusCode(0xDEAD_BEEF),
        ];
        for code in failing {
            assert!(!code.is_good());
            assert_ne!(code.name(), "Good");
        }
    }

    #[test]
    fn unknown_code_degrades_to_marker() {
        assert_eq!(StatusCode(0x7777_0000).name(), "Unknown StatusCode");
    }
}
