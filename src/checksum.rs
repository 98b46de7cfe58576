use crc::{Crc, CRC_16_IBM_3740};

/// CRC-16/CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflection, no final xor.
pub const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

pub fn crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// Checksum rendered the way it is appended to a payload: 4 uppercase hex digits.
pub fn crc16_hex(payload: &str) -> String {
    format!("{:04X}", crc16(payload.as_bytes()))
}
