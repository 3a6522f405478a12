//! Type-safe records in the real-time clock's battery-backed RAM.
//!
//! The 56 bytes behind the clock registers survive power loss as long as the coin
//! cell does, which makes them the natural home for small settings such as the alarm
//! time or the 12/24-hour preference. A record is framed as:
//!
//! ```text
//! [magic u16][type hash u32][payload len u8][postcard payload][crc32 u32]
//! ```
//!
//! Reads use whiteboard semantics: RAM that holds nothing (fresh battery) or a record
//! of another type loads as `None`. A record whose length or CRC does not check out
//! is reported as [`Error::StorageCorrupted`].

use crc32fast::Hasher;
use embedded_hal::i2c::I2c;
use serde::{Serialize, de::DeserializeOwned};

use crate::time_keeper::{RAM_CAPACITY, TimeKeeper};
use crate::{Error, Result};

const MAGIC: u16 = 0x434B; // 'CK'
const MAGIC_OFFSET: usize = 0;
const TYPE_HASH_OFFSET: usize = 2;
const LEN_OFFSET: usize = 6;
const HEADER_SIZE: usize = 7; // Magic + TypeHash + PayloadLen
const CRC_SIZE: usize = 4;

/// Largest postcard payload that fits next to the header and checksum.
pub const MAX_PAYLOAD_SIZE: usize = RAM_CAPACITY - HEADER_SIZE - CRC_SIZE; // 45 bytes

/// Serialize `value` into the RAM mirror and write exactly the framed bytes to the chip.
///
/// # Errors
///
/// Returns [`Error::FormatError`] if the value does not serialize into
/// [`MAX_PAYLOAD_SIZE`] bytes, or [`Error::Bus`] if the write fails.
pub fn save<I2C: I2c, T: Serialize>(rtc: &mut TimeKeeper<I2C>, value: &T) -> Result<()> {
    let mut payload_buffer = [0u8; MAX_PAYLOAD_SIZE];
    let payload = postcard::to_slice(value, &mut payload_buffer).map_err(|_| {
        #[cfg(feature = "defmt")]
        defmt::error!(
            "RamRecord: serialization failed or data too large (max {} bytes)",
            MAX_PAYLOAD_SIZE
        );
        Error::FormatError
    })?;
    let payload_len = u8::try_from(payload.len()).map_err(|_| Error::FormatError)?;
    let crc_offset = HEADER_SIZE + payload.len();

    let ram = rtc.ram_mut();
    put(ram, MAGIC_OFFSET, &MAGIC.to_le_bytes())?;
    put(ram, TYPE_HASH_OFFSET, &compute_type_hash::<T>().to_le_bytes())?;
    put(ram, LEN_OFFSET, &[payload_len])?;
    put(ram, HEADER_SIZE, payload)?;
    let crc = compute_crc(ram.get(..crc_offset).ok_or(Error::FormatError)?);
    put(ram, crc_offset, &crc.to_le_bytes())?;

    rtc.save_ram_data(crc_offset + CRC_SIZE)?;
    #[cfg(feature = "defmt")]
    defmt::info!("RamRecord: saved {} payload bytes", payload_len);
    Ok(())
}

/// Read the whole RAM and decode the record it holds, if it is a `T`.
///
/// # Errors
///
/// Returns [`Error::Bus`] if the read fails, or [`Error::StorageCorrupted`] if a record
/// of this type is present but its length, checksum or payload is damaged.
pub fn load<I2C: I2c, T: DeserializeOwned>(rtc: &mut TimeKeeper<I2C>) -> Result<Option<T>> {
    rtc.get_ram_data(RAM_CAPACITY)?;
    let ram = rtc.ram();

    if u16::from_le_bytes(field(ram, MAGIC_OFFSET)?) != MAGIC {
        #[cfg(feature = "defmt")]
        defmt::info!("RamRecord: no record");
        return Ok(None);
    }

    let stored_type_hash = u32::from_le_bytes(field(ram, TYPE_HASH_OFFSET)?);
    if stored_type_hash != compute_type_hash::<T>() {
        #[cfg(feature = "defmt")]
        defmt::info!("RamRecord: record holds another type ({})", stored_type_hash);
        return Ok(None);
    }

    let [payload_len] = field::<1>(ram, LEN_OFFSET)?;
    let payload_len = usize::from(payload_len);
    if payload_len > MAX_PAYLOAD_SIZE {
        #[cfg(feature = "defmt")]
        defmt::error!("RamRecord: invalid payload length {}", payload_len);
        return Err(Error::StorageCorrupted);
    }

    let crc_offset = HEADER_SIZE + payload_len;
    let stored_crc = u32::from_le_bytes(field(ram, crc_offset)?);
    let computed_crc = compute_crc(ram.get(..crc_offset).ok_or(Error::StorageCorrupted)?);
    if stored_crc != computed_crc {
        #[cfg(feature = "defmt")]
        defmt::error!(
            "RamRecord: CRC mismatch (expected {}, found {})",
            computed_crc,
            stored_crc
        );
        return Err(Error::StorageCorrupted);
    }

    let payload = ram
        .get(HEADER_SIZE..crc_offset)
        .ok_or(Error::StorageCorrupted)?;
    let value = postcard::from_bytes(payload).map_err(|_| Error::StorageCorrupted)?;
    Ok(Some(value))
}

/// Erase the record header so the next [`load`] returns `None`.
///
/// # Errors
///
/// Returns [`Error::Bus`] if the write fails.
pub fn clear<I2C: I2c>(rtc: &mut TimeKeeper<I2C>) -> Result<()> {
    if let Some(header) = rtc.ram_mut().get_mut(..HEADER_SIZE) {
        header.fill(0);
    }
    rtc.save_ram_data(HEADER_SIZE)?;
    Ok(())
}

fn put(ram: &mut [u8], offset: usize, bytes: &[u8]) -> Result<()> {
    ram.get_mut(offset..offset + bytes.len())
        .ok_or(Error::FormatError)?
        .copy_from_slice(bytes);
    Ok(())
}

fn field<const N: usize>(ram: &[u8], offset: usize) -> Result<[u8; N]> {
    ram.get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(Error::StorageCorrupted)
}

/// Compute FNV-1a hash of the type name for type safety.
fn compute_type_hash<T: ?Sized>() -> u32 {
    const FNV_PRIME: u32 = 16_777_619;
    const FNV_OFFSET: u32 = 2_166_136_261;

    core::any::type_name::<T>()
        .bytes()
        .fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
