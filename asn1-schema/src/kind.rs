//! ASN.1 node kinds: the universal types plus the non-universal schema
//! pseudo-kinds the decoder has to special-case.

/// The kind of a schema node.
///
/// Mirrors `node_type_t` in the source grammar: the universal ASN.1 types
/// carry their wire tag number (see [`Kind::universal_tag`]); the
/// non-universal kinds are schema-only constructs that never appear on the
/// wire themselves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    ObjectDescriptor,
    External,
    Real,
    Enumerated,
    EmbeddedPdv,
    Utf8String,
    /// Spelled `TYPE_REALTIVE_OID` in the source (typo preserved there, not
    /// here). Treated identically to `ObjectIdentifier` throughout — see
    /// DESIGN.md.
    RelativeOid,
    Sequence,
    Set,
    NumericString,
    PrintableString,
    TeletexString,
    VideotexString,
    Ia5String,
    UtcTime,
    GeneralizedTime,
    GraphicString,
    VisibleString,
    GeneralString,
    UniversalString,
    CharacterString,
    BmpString,

    /// Schema-only kinds, never have a universal wire tag.
    Constant,
    Identifier,
    Tag,
    Default,
    Size,
    SequenceOf,
    Any,
    SetOf,
    Definitions,
    Choice,
    Imports,
}

impl Kind {
    /// The ITU-T X.690 universal tag number for this kind, if it is one of
    /// the universal ASN.1 types.
    pub fn universal_tag(self) -> Option<u32> {
        use Kind::*;
        Some(match self {
            Boolean => 1,
            Integer => 2,
            BitString => 3,
            OctetString => 4,
            Null => 5,
            ObjectIdentifier => 6,
            ObjectDescriptor => 7,
            External => 8,
            Real => 9,
            Enumerated => 10,
            EmbeddedPdv => 11,
            Utf8String => 12,
            RelativeOid => 13,
            Sequence => 16,
            Set => 17,
            NumericString => 18,
            PrintableString => 19,
            TeletexString => 20,
            VideotexString => 21,
            Ia5String => 22,
            UtcTime => 23,
            GeneralizedTime => 24,
            GraphicString => 25,
            VisibleString => 26,
            GeneralString => 27,
            UniversalString => 28,
            CharacterString => 29,
            BmpString => 30,
            _ => return None,
        })
    }

    /// Inverse of [`Kind::universal_tag`]: recover a universal `Kind` from
    /// its wire tag number.
    pub fn from_universal_tag(tag: u32) -> Option<Kind> {
        use Kind::*;
        Some(match tag {
            1 => Boolean,
            2 => Integer,
            3 => BitString,
            4 => OctetString,
            5 => Null,
            6 => ObjectIdentifier,
            7 => ObjectDescriptor,
            8 => External,
            9 => Real,
            10 => Enumerated,
            11 => EmbeddedPdv,
            12 => Utf8String,
            13 => RelativeOid,
            16 => Sequence,
            17 => Set,
            18 => NumericString,
            19 => PrintableString,
            20 => TeletexString,
            21 => VideotexString,
            22 => Ia5String,
            23 => UtcTime,
            24 => GeneralizedTime,
            25 => GraphicString,
            26 => VisibleString,
            27 => GeneralString,
            28 => UniversalString,
            29 => CharacterString,
            30 => BmpString,
            _ => return None,
        })
    }

    /// True for the universal types the decoder treats as primitive leaves
    /// (excludes `Sequence`/`Set`, `External`/`EmbeddedPdv`, which are
    /// always constructed, and the non-universal kinds).
    pub fn is_primitive(self) -> bool {
        use Kind::*;
        matches!(
            self,
            Boolean
                | Integer
                | BitString
                | OctetString
                | Null
                | ObjectIdentifier
                | ObjectDescriptor
                | Real
                | Enumerated
                | Utf8String
                | RelativeOid
                | NumericString
                | PrintableString
                | TeletexString
                | VideotexString
                | Ia5String
                | UtcTime
                | GeneralizedTime
                | GraphicString
                | VisibleString
                | GeneralString
                | UniversalString
                | CharacterString
                | BmpString
        )
    }
}

/// A TLV tag class (ITU-T X.690 bits 7-6 of the identifier octet).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TagClass {
    Universal = 0,
    Application = 1,
    Context = 2,
    Private = 3,
}

impl TagClass {
    /// Decode from the two class bits of a BER identifier octet (already
    /// shifted down to `0..=3`).
    pub fn from_bits(bits: u8) -> TagClass {
        match bits & 0b11 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::Context,
            _ => TagClass::Private,
        }
    }
}
