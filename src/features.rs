//! # Feature Configuration
//!
//! CPU variants differ in a handful of places: whether decimal mode exists,
//! which silicon bugs are present and whether the 65c02 opcodes decode.
//! Rather than one core per variant, [`Features`] is plain data consulted at
//! those few branch points.
//!
//! ```
//! use lib65x02::Features;
//!
//! // A NES-style core: decimal flag exists but ADC/SBC ignore it
//! let nes = Features::builder().decimal_mode(false).build();
//! assert_eq!(nes, Features::ricoh_2a03());
//! assert!(nes.indirect_jump_bug);
//! ```

use typed_builder::TypedBuilder;

/// Named toggles selecting hardware quirks and the instruction family.
///
/// The defaults describe a stock NMOS 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Features {
    /// ADC and SBC honour the decimal flag.
    ///
    /// Turning this off does not stop `SED`/`CLD` from changing the flag.
    #[builder(default = true)]
    pub decimal_mode: bool,

    /// Pre-production ROR: behaves as a left shift and never outputs carry.
    #[builder(default = false)]
    pub ror_bug: bool,

    /// `JMP ($xxFF)` fetches its high byte from `$xx00` instead of the next page.
    #[builder(default = true)]
    pub indirect_jump_bug: bool,

    /// After a decimal ADC/SBC, Z, N and V reflect the binary result.
    #[builder(default = true)]
    pub decimal_flags_bug: bool,

    /// Unknown opcodes are skipped as 1, 2 or 3 byte NOPs based on their
    /// low nibble, like the 65c02 does.
    #[builder(default = false)]
    pub advance_on_invalid: bool,

    /// Decode the 65c02 instruction set in addition to the NMOS one.
    #[builder(default = false)]
    pub cmos: bool,

    /// Refuse to place the bulk-load cursor in zero page or the stack.
    #[builder(default = true)]
    pub restrict_cursor: bool,
}

impl Features {
    /// Stock NMOS 6502.
    pub fn nmos() -> Self {
        Self::builder().build()
    }

    /// The NES CPU: an NMOS core with decimal arithmetic removed.
    pub fn ricoh_2a03() -> Self {
        Self::builder().decimal_mode(false).build()
    }

    /// A 65c02: NMOS bugs fixed, extra opcodes, undefined opcodes act as NOPs.
    pub fn cmos_65c02() -> Self {
        Self::builder()
            .indirect_jump_bug(false)
            .decimal_flags_bug(false)
            .advance_on_invalid(true)
            .cmos(true)
            .build()
    }

    /// Early 1975 silicon with the broken ROR.
    pub fn early_revision() -> Self {
        Self::builder().ror_bug(true).build()
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::nmos()
    }
}
