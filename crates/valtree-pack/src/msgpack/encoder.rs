//! Low-level MessagePack encoder.

use valtree::tuple::Tuple;
use valtree_buffers::Writer;

use super::constants::*;

/// Writes MessagePack primitives into a [`Writer`], always choosing the
/// smallest representation for integers and headers.
pub struct MsgPackEncoder {
    pub writer: Writer,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn with_writer(writer: Writer) -> Self {
        Self { writer }
    }

    /// Encode a storage tuple and return the bytes.
    pub fn encode_tuple(&mut self, tuple: &Tuple) -> Vec<u8> {
        self.writer.reset();
        self.write_tuple(tuple);
        self.writer.flush()
    }

    pub fn write_tuple(&mut self, tuple: &Tuple) {
        match tuple {
            Tuple::Nil => self.write_null(),
            Tuple::Bool(value) => self.write_boolean(*value),
            Tuple::Int(value) => self.write_integer(*value),
            Tuple::Float(value) => self.write_f64(*value),
            Tuple::Str(value) => self.write_str(value),
            Tuple::Bin(value) => self.write_bin(value),
            Tuple::List(items) => {
                self.write_arr_hdr(items.len());
                for item in items {
                    self.write_tuple(item);
                }
            }
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_boolean(&mut self, value: bool) {
        self.writer.u8(if value { TRUE } else { FALSE });
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else if int >= -0x20 {
            self.writer.u8(int as i8 as u8);
        } else if int >= i8::MIN as i64 {
            self.writer.u8(INT8);
            self.writer.i8(int as i8);
        } else if int >= i16::MIN as i64 {
            self.writer.u8(INT16);
            self.writer.i16(int as i16);
        } else if int >= i32::MIN as i64 {
            self.writer.u8(INT32);
            self.writer.i32(int as i32);
        } else {
            self.writer.u8(INT64);
            self.writer.i64(int);
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        if uint <= 0x7f {
            self.writer.u8(uint as u8);
        } else if uint <= 0xff {
            self.writer.u8u8(UINT8, uint as u8);
        } else if uint <= 0xffff {
            self.writer.u8u16(UINT16, uint as u16);
        } else if uint <= 0xffff_ffff {
            self.writer.u8u32(UINT32, uint as u32);
        } else {
            self.writer.u8u64(UINT64, uint);
        }
    }

    pub fn write_f32(&mut self, float: f32) {
        self.writer.u8f32(FLOAT32, float);
    }

    pub fn write_f64(&mut self, float: f64) {
        self.writer.u8f64(FLOAT64, float);
    }

    pub fn write_str(&mut self, text: &str) {
        let length = text.len();
        if length <= 31 {
            self.writer.u8(FIXSTR | length as u8);
        } else if length <= 0xff {
            self.writer.u8u8(STR8, length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(STR16, length as u16);
        } else {
            self.writer.u8u32(STR32, length as u32);
        }
        self.writer.utf8(text);
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.write_bin_hdr(buf.len());
        self.writer.buf(buf);
    }

    pub fn write_bin_hdr(&mut self, length: usize) {
        if length <= 0xff {
            self.writer.u8u8(BIN8, length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(BIN16, length as u16);
        } else {
            self.writer.u8u32(BIN32, length as u32);
        }
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        if length <= 15 {
            self.writer.u8(FIXARRAY | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(ARRAY16, length as u16);
        } else {
            self.writer.u8u32(ARRAY32, length as u32);
        }
    }

    pub fn write_obj_hdr(&mut self, length: usize) {
        if length <= 15 {
            self.writer.u8(FIXMAP | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(MAP16, length as u16);
        } else {
            self.writer.u8u32(MAP32, length as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(write: impl FnOnce(&mut MsgPackEncoder)) -> Vec<u8> {
        let mut encoder = MsgPackEncoder::new();
        write(&mut encoder);
        encoder.writer.flush()
    }

    #[test]
    fn integers_use_minimal_width() {
        let cases: Vec<(i64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (127, vec![0x7f]),
            (128, vec![0xcc, 0x80]),
            (256, vec![0xcd, 0x01, 0x00]),
            (65_536, vec![0xce, 0x00, 0x01, 0x00, 0x00]),
            (-1, vec![0xff]),
            (-32, vec![0xe0]),
            (-33, vec![0xd0, 0xdf]),
            (-129, vec![0xd1, 0xff, 0x7f]),
            (i64::MIN, vec![0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0]),
        ];
        for (value, bytes) in cases {
            assert_eq!(encoded(|e| e.write_integer(value)), bytes, "{value}");
        }
    }

    #[test]
    fn floats_keep_their_width() {
        assert_eq!(encoded(|e| e.write_f32(1.5)), vec![0xca, 0x3f, 0xc0, 0x00, 0x00]);
        assert_eq!(encoded(|e| e.write_f64(1.5))[0], 0xcb);
    }

    #[test]
    fn headers() {
        assert_eq!(encoded(|e| e.write_str("ab")), vec![0xa2, b'a', b'b']);
        assert_eq!(encoded(|e| e.write_str(&"x".repeat(32)))[..2], [0xd9, 32]);
        assert_eq!(encoded(|e| e.write_bin(&[7])), vec![0xc4, 0x01, 0x07]);
        assert_eq!(encoded(|e| e.write_arr_hdr(16)), vec![0xdc, 0x00, 0x10]);
        assert_eq!(encoded(|e| e.write_obj_hdr(2)), vec![0x82]);
    }

    #[test]
    fn tuples() {
        let tuple = Tuple::List(vec![Tuple::Int(0), Tuple::Str("a".into()), Tuple::Nil]);
        assert_eq!(
            MsgPackEncoder::new().encode_tuple(&tuple),
            vec![0x93, 0x00, 0xa1, b'a', 0xc0]
        );
    }
}
