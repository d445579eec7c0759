use soroban_sdk::{BytesN, Env, String};

pub const ADDRESS_LENGTH: usize = 20;

const HEX_LENGTH: usize = ADDRESS_LENGTH * 2;
const PREFIXED_HEX_LENGTH: usize = HEX_LENGTH + 2;

/// Raw 20-byte address a registry key points at.
pub type PointerAddress = BytesN<ADDRESS_LENGTH>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressParseError {
    InvalidLength,
    MissingPrefix,
    InvalidHex,
}

/// Parse pointer text of the form `0x` + 40 hex digits (prefix optional,
/// either case). Checksum casing is not verified.
pub fn parse_address(env: &Env, text: &String) -> Result<PointerAddress, AddressParseError> {
    let len = text.len() as usize;
    if len != HEX_LENGTH && len != PREFIXED_HEX_LENGTH {
        return Err(AddressParseError::InvalidLength);
    }

    let mut buf = [0u8; PREFIXED_HEX_LENGTH];
    let text_bytes = &mut buf[..len];
    text.copy_into_slice(text_bytes);

    let digits: &[u8] = if len == PREFIXED_HEX_LENGTH {
        if !matches!(text_bytes[..2], [b'0', b'x' | b'X']) {
            return Err(AddressParseError::MissingPrefix);
        }
        &text_bytes[2..]
    } else {
        text_bytes
    };

    let mut raw = [0u8; ADDRESS_LENGTH];
    hex::decode_to_slice(digits, &mut raw).map_err(|_| AddressParseError::InvalidHex)?;

    Ok(BytesN::from_array(env, &raw))
}
