//! Register transfer layer.
//!
//! Turns "write these bytes starting at register R" into one or more framed
//! bus writes that fit a send buffer of `N` bytes, and "read K bytes from
//! register R" into a pointer-setting write followed by a single receive.
//!
//! Every frame is `[register, data...]`: the first byte of the send buffer is
//! always the register pointer, so at most `N - 1` data bytes travel per
//! frame. The chip auto-increments its pointer, so each following frame
//! starts where the previous one ended.
//!
//! This module is crate-private; consumers go through [`Ds1307`](crate::Ds1307)
//! or [`Ds1307Async`](crate::Ds1307Async).

use crate::error::Ds1307Error;
use crate::registers::{DEVICE_ADDRESS, MIN_SEND_BUFFER_SIZE};
use crate::transport::{AsyncTransport, Transport};

/// Compile-time check that a send buffer can hold the address byte plus data.
pub(crate) struct SendBuffer<const N: usize>;

impl<const N: usize> SendBuffer<N> {
    pub(crate) const ASSERT_USABLE: () = assert!(
        N >= MIN_SEND_BUFFER_SIZE,
        "send buffer must hold the register address and at least one data byte"
    );

    /// Largest data payload per frame.
    pub(crate) const CHUNK: usize = N - 1;
}

/// Cursor over the frames of one logical register write.
pub(crate) struct WriteFrames<'a> {
    register: u8,
    data: &'a [u8],
}

impl<'a> WriteFrames<'a> {
    pub(crate) fn new(register: u8, data: &'a [u8]) -> Self {
        Self { register, data }
    }

    /// Assemble the next frame into `buffer` and return its length, or
    /// `None` once all data has been framed.
    pub(crate) fn next_frame<const N: usize>(&mut self, buffer: &mut [u8; N]) -> Option<usize> {
        let () = SendBuffer::<N>::ASSERT_USABLE;

        if self.data.is_empty() {
            return None;
        }

        let len = self.data.len().min(SendBuffer::<N>::CHUNK);
        let (chunk, rest) = self.data.split_at(len);

        buffer[0] = self.register;
        buffer[1..=len].copy_from_slice(chunk);

        // The register map ends at 0x3F, so the pointer never wraps in
        // practice; wrapping matches the chip's own pointer behaviour.
        self.register = self.register.wrapping_add(len as u8);
        self.data = rest;

        Some(len + 1)
    }
}

// ---------------------------------------------------------------------------
// Blocking
// ---------------------------------------------------------------------------

/// Write `data` to consecutive registers starting at `register`.
///
/// Stops at the first failed frame. Frames already sent stay applied.
pub(crate) fn write_registers<T, const N: usize>(
    transport: &mut T,
    register: u8,
    data: &[u8],
) -> Result<(), Ds1307Error<T::Error>>
where
    T: Transport,
{
    let mut buffer = [0u8; N];
    let mut frames = WriteFrames::new(register, data);

    while let Some(len) = frames.next_frame(&mut buffer) {
        #[cfg(feature = "defmt")]
        defmt::trace!("DS1307 write: reg {=u8:#x}, {=usize} bytes", buffer[0], len - 1);

        transport.send(DEVICE_ADDRESS, &buffer[..len]).map_err(|error| {
            #[cfg(feature = "defmt")]
            defmt::warn!("DS1307 send failed: reg {=u8:#x}", buffer[0]);

            Ds1307Error::Transport(error)
        })?;
    }

    Ok(())
}

/// Fill `buffer` from consecutive registers starting at `register`.
///
/// On error the contents of `buffer` are unspecified and the chip's
/// register pointer is undefined.
pub(crate) fn read_registers<T>(
    transport: &mut T,
    register: u8,
    buffer: &mut [u8],
) -> Result<(), Ds1307Error<T::Error>>
where
    T: Transport,
{
    #[cfg(feature = "defmt")]
    defmt::trace!("DS1307 read: reg {=u8:#x}, {=usize} bytes", register, buffer.len());

    // Position the chip's register pointer, then read from it.
    transport.send(DEVICE_ADDRESS, &[register]).map_err(|error| {
        #[cfg(feature = "defmt")]
        defmt::warn!("DS1307 pointer write failed: reg {=u8:#x}", register);

        Ds1307Error::Transport(error)
    })?;
    transport.receive(DEVICE_ADDRESS, buffer).map_err(|error| {
        #[cfg(feature = "defmt")]
        defmt::warn!("DS1307 receive failed: reg {=u8:#x}", register);

        Ds1307Error::Transport(error)
    })?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Async
// ---------------------------------------------------------------------------

/// Async version of [`write_registers`].
pub(crate) async fn write_registers_async<T, const N: usize>(
    transport: &mut T,
    register: u8,
    data: &[u8],
) -> Result<(), Ds1307Error<T::Error>>
where
    T: AsyncTransport,
{
    let mut buffer = [0u8; N];
    let mut frames = WriteFrames::new(register, data);

    while let Some(len) = frames.next_frame(&mut buffer) {
        #[cfg(feature = "defmt")]
        defmt::trace!("DS1307 write: reg {=u8:#x}, {=usize} bytes", buffer[0], len - 1);

        transport.send(DEVICE_ADDRESS, &buffer[..len]).await.map_err(|error| {
            #[cfg(feature = "defmt")]
            defmt::warn!("DS1307 send failed: reg {=u8:#x}", buffer[0]);

            Ds1307Error::Transport(error)
        })?;
    }

    Ok(())
}

/// Async version of [`read_registers`].
pub(crate) async fn read_registers_async<T>(
    transport: &mut T,
    register: u8,
    buffer: &mut [u8],
) -> Result<(), Ds1307Error<T::Error>>
where
    T: AsyncTransport,
{
    #[cfg(feature = "defmt")]
    defmt::trace!("DS1307 read: reg {=u8:#x}, {=usize} bytes", register, buffer.len());

    transport.send(DEVICE_ADDRESS, &[register]).await.map_err(|error| {
        #[cfg(feature = "defmt")]
        defmt::warn!("DS1307 pointer write failed: reg {=u8:#x}", register);

        Ds1307Error::Transport(error)
    })?;
    transport.receive(DEVICE_ADDRESS, buffer).await.map_err(|error| {
        #[cfg(feature = "defmt")]
        defmt::warn!("DS1307 receive failed: reg {=u8:#x}", register);

        Ds1307Error::Transport(error)
    })?;

    Ok(())
}
