//! The fixed four-char schema table.
//!
//! These codes are defined by the remote-object protocol; they are not
//! negotiable per connection. Grouped by role: value type tags, query
//! record keys, key forms, enumerators, operators, event opcodes, and
//! envelope parameter/attribute keys.

use crate::four_cc::FourCc;

// ===== Value type tags =====

pub const TYPE_BOOLEAN: FourCc = FourCc::new(b"bool");
pub const TYPE_TRUE: FourCc = FourCc::new(b"true");
pub const TYPE_FALSE: FourCc = FourCc::new(b"fals");
pub const TYPE_SINT16: FourCc = FourCc::new(b"shor");
pub const TYPE_SINT32: FourCc = FourCc::new(b"long");
pub const TYPE_SINT64: FourCc = FourCc::new(b"comp");
pub const TYPE_UINT32: FourCc = FourCc::new(b"magn");
pub const TYPE_UINT64: FourCc = FourCc::new(b"ucom");
pub const TYPE_FLOAT64: FourCc = FourCc::new(b"doub");
pub const TYPE_UTF8_TEXT: FourCc = FourCc::new(b"utf8");
pub const TYPE_TIMESTAMP: FourCc = FourCc::new(b"ldt ");
pub const TYPE_RAW_DATA: FourCc = FourCc::new(b"tdta");
pub const TYPE_POINT: FourCc = FourCc::new(b"QDpt");
pub const TYPE_RECT: FourCc = FourCc::new(b"qdrt");
pub const TYPE_RGB_COLOR: FourCc = FourCc::new(b"cRGB");
pub const TYPE_FILE_URL: FourCc = FourCc::new(b"furl");
pub const TYPE_LIST: FourCc = FourCc::new(b"list");
pub const TYPE_RECORD: FourCc = FourCc::new(b"reco");
pub const TYPE_TYPE: FourCc = FourCc::new(b"type");
pub const TYPE_ENUMERATED: FourCc = FourCc::new(b"enum");
pub const TYPE_PROPERTY: FourCc = FourCc::new(b"prop");
pub const TYPE_ABSOLUTE_ORDINAL: FourCc = FourCc::new(b"abso");

/// Symbol code carried by the missing-value sentinel (typed `type`).
pub const CODE_MISSING_VALUE: FourCc = FourCc::new(b"msng");

// ===== Query roots (zero-payload sentinels) =====

pub const TYPE_APPLICATION_ROOT: FourCc = FourCc::new(b"null");
pub const TYPE_CONTAINER_ROOT: FourCc = FourCc::new(b"ccnt");
pub const TYPE_SPECIMEN_ROOT: FourCc = FourCc::new(b"exmn");

// ===== Query record forms =====

pub const TYPE_OBJECT_SPECIFIER: FourCc = FourCc::new(b"obj ");
pub const TYPE_INSERTION_LOC: FourCc = FourCc::new(b"insl");
pub const TYPE_COMPARISON: FourCc = FourCc::new(b"cmpd");
pub const TYPE_LOGICAL: FourCc = FourCc::new(b"logi");
pub const TYPE_RANGE: FourCc = FourCc::new(b"rang");

pub const KEY_WANT_TYPE: FourCc = FourCc::new(b"want");
pub const KEY_FORM: FourCc = FourCc::new(b"form");
pub const KEY_DATA: FourCc = FourCc::new(b"seld");
pub const KEY_CONTAINER: FourCc = FourCc::new(b"from");
pub const KEY_INSERTION_OBJECT: FourCc = FourCc::new(b"kobj");
pub const KEY_INSERTION_POSITION: FourCc = FourCc::new(b"kpos");
pub const KEY_COMPARISON_OPERATOR: FourCc = FourCc::new(b"relo");
pub const KEY_FIRST_OPERAND: FourCc = FourCc::new(b"obj1");
pub const KEY_SECOND_OPERAND: FourCc = FourCc::new(b"obj2");
pub const KEY_LOGICAL_OPERATOR: FourCc = FourCc::new(b"logc");
pub const KEY_LOGICAL_TERMS: FourCc = FourCc::new(b"term");
pub const KEY_RANGE_START: FourCc = FourCc::new(b"star");
pub const KEY_RANGE_STOP: FourCc = FourCc::new(b"stop");

// ===== Key forms =====

pub const FORM_PROPERTY: FourCc = FourCc::new(b"prop");
pub const FORM_USER_PROPERTY: FourCc = FourCc::new(b"usrp");
pub const FORM_NAME: FourCc = FourCc::new(b"name");
pub const FORM_UNIQUE_ID: FourCc = FourCc::new(b"ID  ");
pub const FORM_ABSOLUTE_POSITION: FourCc = FourCc::new(b"indx");
pub const FORM_RELATIVE_POSITION: FourCc = FourCc::new(b"rele");
pub const FORM_RANGE: FourCc = FourCc::new(b"rang");
pub const FORM_TEST: FourCc = FourCc::new(b"test");

/// Desired-class code used by property-form specifiers.
pub const CLASS_PROPERTY: FourCc = FourCc::new(b"prop");

// ===== Ordinals, positions =====

pub const ORDINAL_FIRST: FourCc = FourCc::new(b"firs");
pub const ORDINAL_MIDDLE: FourCc = FourCc::new(b"midd");
pub const ORDINAL_LAST: FourCc = FourCc::new(b"last");
pub const ORDINAL_RANDOM: FourCc = FourCc::new(b"any ");
pub const ORDINAL_ALL: FourCc = FourCc::new(b"all ");
pub const ORDINAL_PREVIOUS: FourCc = FourCc::new(b"prev");
pub const ORDINAL_NEXT: FourCc = FourCc::new(b"next");

pub const POSITION_BEGINNING: FourCc = FourCc::new(b"bgng");
pub const POSITION_END: FourCc = FourCc::new(b"end ");
pub const POSITION_BEFORE: FourCc = FourCc::new(b"befo");
pub const POSITION_AFTER: FourCc = FourCc::new(b"aftr");

// ===== Test operators =====

pub const OP_LESS: FourCc = FourCc::new(b"<   ");
pub const OP_LESS_OR_EQUAL: FourCc = FourCc::new(b"<=  ");
pub const OP_EQUAL: FourCc = FourCc::new(b"=   ");
pub const OP_GREATER: FourCc = FourCc::new(b">   ");
pub const OP_GREATER_OR_EQUAL: FourCc = FourCc::new(b">=  ");
pub const OP_BEGINS_WITH: FourCc = FourCc::new(b"bgwt");
pub const OP_ENDS_WITH: FourCc = FourCc::new(b"ends");
pub const OP_CONTAINS: FourCc = FourCc::new(b"cont");
/// Pseudo-operator: never emitted by the encoder (which reverses the
/// operands under `cont`), but accepted on decode from peers that use
/// the reserved code directly.
pub const OP_IS_IN: FourCc = FourCc::new(b"isin");
pub const OP_AND: FourCc = FourCc::new(b"AND ");
pub const OP_OR: FourCc = FourCc::new(b"OR  ");
pub const OP_NOT: FourCc = FourCc::new(b"NOT ");

// ===== Event opcodes =====

pub const CLASS_CORE: FourCc = FourCc::new(b"core");
pub const CLASS_MISC: FourCc = FourCc::new(b"misc");
pub const CLASS_APPLICATION: FourCc = FourCc::new(b"aevt");
pub const CLASS_SCRIPT: FourCc = FourCc::new(b"ascr");

pub const ID_GET_DATA: FourCc = FourCc::new(b"getd");
pub const ID_CREATE_ELEMENT: FourCc = FourCc::new(b"crel");
pub const ID_LAUNCH_NOOP: FourCc = FourCc::new(b"noop");
pub const ID_OPEN_APPLICATION: FourCc = FourCc::new(b"oapp");
pub const ID_BEGIN_TRANSACTION: FourCc = FourCc::new(b"begi");
pub const ID_END_TRANSACTION: FourCc = FourCc::new(b"endt");
pub const ID_ABORT_TRANSACTION: FourCc = FourCc::new(b"ttrm");

// ===== Envelope parameter keys =====

pub const KEY_DIRECT_OBJECT: FourCc = FourCc::new(b"----");
pub const KEY_INSERT_HERE: FourCc = FourCc::new(b"insh");
pub const KEY_REQUESTED_TYPE: FourCc = FourCc::new(b"rtyp");
pub const KEY_ERROR_NUMBER: FourCc = FourCc::new(b"errn");
pub const KEY_ERROR_STRING: FourCc = FourCc::new(b"errs");
pub const KEY_BRIEF_MESSAGE: FourCc = FourCc::new(b"errb");
pub const KEY_EXPECTED_TYPE: FourCc = FourCc::new(b"errt");
pub const KEY_OFFENDING_OBJECT: FourCc = FourCc::new(b"erob");
pub const KEY_PARTIAL_RESULT: FourCc = FourCc::new(b"ptlr");

// ===== Envelope attribute keys (reserved namespace) =====

pub const ATTR_SUBJECT: FourCc = FourCc::new(b"subj");
pub const ATTR_CONSIDERATIONS: FourCc = FourCc::new(b"csig");
pub const ATTR_RETURN_ID: FourCc = FourCc::new(b"rtid");
pub const ATTR_TRANSACTION: FourCc = FourCc::new(b"tran");

/// Reserved attribute-namespace keys. A keyed container encoding a
/// request routes these to envelope attributes, never record fields.
pub const RESERVED_ATTRIBUTES: [FourCc; 4] =
    [ATTR_SUBJECT, ATTR_CONSIDERATIONS, ATTR_RETURN_ID, ATTR_TRANSACTION];

/// Returns true if `key` belongs to the reserved attribute namespace.
pub fn is_reserved_attribute(key: FourCc) -> bool {
    RESERVED_ATTRIBUTES.contains(&key)
}
