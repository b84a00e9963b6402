//! No-std number formatting for the serial log line.
//!
//! Writes digits straight into byte buffers; no allocation, no `core::fmt`.

/// Write a u16 as an unsigned decimal string.
///
/// Returns the number of bytes written (1-5 bytes).
#[inline]
pub fn write_u16(buf: &mut [u8], value: u16) -> usize {
    debug_assert!(buf.len() >= 5, "buffer too small for u16");

    if value == 0 {
        buf[0] = b'0';
        return 1;
    }

    // digits come out least significant first
    let mut temp = [0u8; 5];
    let mut n = value;
    let mut len = 0;
    while n > 0 {
        temp[len] = b'0' + (n % 10) as u8;
        n /= 10;
        len += 1;
    }

    for i in 0..len {
        buf[i] = temp[len - 1 - i];
    }

    len
}

/// Write a u8 as an unsigned decimal string.
///
/// Returns the number of bytes written (1-3 bytes).
#[inline]
pub fn write_u8(buf: &mut [u8], value: u8) -> usize {
    debug_assert!(buf.len() >= 3, "buffer too small for u8");
    let mut temp = [0u8; 5];
    let len = write_u16(&mut temp, value as u16);
    buf[..len].copy_from_slice(&temp[..len]);
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_u16() {
        let mut buf = [0u8; 5];

        let len = write_u16(&mut buf, 0);
        assert_eq!(&buf[..len], b"0");

        let len = write_u16(&mut buf, 7);
        assert_eq!(&buf[..len], b"7");

        let len = write_u16(&mut buf, 512);
        assert_eq!(&buf[..len], b"512");

        let len = write_u16(&mut buf, 1023);
        assert_eq!(&buf[..len], b"1023");

        let len = write_u16(&mut buf, u16::MAX);
        assert_eq!(&buf[..len], b"65535");
    }

    #[test]
    fn test_write_u8() {
        let mut buf = [0u8; 3];

        let len = write_u8(&mut buf, 0);
        assert_eq!(&buf[..len], b"0");

        let len = write_u8(&mut buf, 63);
        assert_eq!(&buf[..len], b"63");

        let len = write_u8(&mut buf, 255);
        assert_eq!(&buf[..len], b"255");
    }
}
