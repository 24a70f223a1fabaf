use crate::error::LookupError;
use crate::keys::{self, NUMBER_ELEMENT_COUNT};
use crate::table::LocaleTable;

const HANIDEC_DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// The eleven symbols of a `<numberingSystem>.NumberElements` entry, in
/// stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal: String,
    pub group: String,
    pub list: String,
    pub percent: String,
    pub zero_digit: String,
    pub digit: String,
    pub minus: String,
    pub exponent: String,
    pub per_mille: String,
    pub infinity: String,
    pub nan: String,
}

impl NumberSymbols {
    /// Returns `None` unless `elements` has exactly eleven entries.
    pub fn from_elements(elements: &[String]) -> Option<Self> {
        let [
            decimal,
            group,
            list,
            percent,
            zero_digit,
            digit,
            minus,
            exponent,
            per_mille,
            infinity,
            nan,
        ] = <&[String; NUMBER_ELEMENT_COUNT]>::try_from(elements).ok()?.clone();

        Some(Self {
            decimal,
            group,
            list,
            percent,
            zero_digit,
            digit,
            minus,
            exponent,
            per_mille,
            infinity,
            nan,
        })
    }

    /// First character of the zero digit, e.g. `'٠'` for `arab`.
    pub fn zero_char(&self) -> Option<char> {
        self.zero_digit.chars().next()
    }

    /// The ten digits 0-9 of this numbering system.
    ///
    /// Digits follow the zero digit in code point order except for
    /// `hanidec`, whose digits are scattered ideographs.
    pub fn digits(&self) -> Option<[char; 10]> {
        let zero = self.zero_char()?;
        if zero == HANIDEC_DIGITS[0] {
            return Some(HANIDEC_DIGITS);
        }
        let mut digits = [zero; 10];
        for (offset, slot) in (0u32..).zip(digits.iter_mut()) {
            *slot = char::from_u32(zero as u32 + offset)?;
        }
        Some(digits)
    }

    /// Render ASCII digits of `ascii` in this numbering system.
    pub fn localize_digits(&self, ascii: &str) -> String {
        let Some(digits) = self.digits() else {
            return ascii.to_string();
        };
        ascii
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => digits[d as usize],
                None => c,
            })
            .collect()
    }
}

impl LocaleTable {
    pub fn number_symbols(&self, numbering_system: &str) -> Result<NumberSymbols, LookupError> {
        let key = keys::number_elements_key(numbering_system);
        let elements = self.list(&key)?;
        NumberSymbols::from_elements(elements).ok_or_else(|| LookupError::WrongShape {
            locale: self.tag().to_string(),
            key,
            expected: "list of 11 number elements",
        })
    }
}
