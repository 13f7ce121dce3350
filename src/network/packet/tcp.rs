use crate::error::{DecodeError, Layer};
use serde::{Deserialize, Serialize};

// 0                   1                   2                   3
// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |          Source Port          |       Destination Port        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                        Sequence Number                        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    Acknowledgment Number                      |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |  Data |           |U|A|P|R|S|F|                               |
// | Offset| Reserved  |R|C|S|S|Y|I|            Window             |
// |       |           |G|K|H|T|N|N|                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |           Checksum            |         Urgent Pointer        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

pub const TCP_MIN_HEADER_LENGTH: usize = 20;

// ポート〜オフセット/フラグワードまでの固定部
const TCP_FIXED_PREFIX_LENGTH: usize = 14;

const DATA_OFFSET_SHIFT: u16 = 12;
const DATA_OFFSET_UNIT_BYTES: u16 = 4;

const FLAG_URG: u16 = 0x0020;
const FLAG_ACK: u16 = 0x0010;
const FLAG_PSH: u16 = 0x0008;
const FLAG_RST: u16 = 0x0004;
const FLAG_SYN: u16 = 0x0002;
const FLAG_FIN: u16 = 0x0001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TCPHeader {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    // バイト単位 (オフセットニブル * 4)
    pub data_offset: u8,
    pub flags: TCPFlags,
    pub window_size: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TCPFlags {
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,
}

impl TCPFlags {
    pub fn from_word(word: u16) -> Self {
        Self {
            urg: word & FLAG_URG != 0,
            ack: word & FLAG_ACK != 0,
            psh: word & FLAG_PSH != 0,
            rst: word & FLAG_RST != 0,
            syn: word & FLAG_SYN != 0,
            fin: word & FLAG_FIN != 0,
        }
    }
}

impl TCPHeader {
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        if data.len() < TCP_FIXED_PREFIX_LENGTH {
            return Err(DecodeError::TruncatedHeader {
                layer: Layer::Tcp,
                needed: TCP_FIXED_PREFIX_LENGTH,
                available: data.len(),
            });
        }

        let source_port = u16::from_be_bytes([data[0], data[1]]);
        let destination_port = u16::from_be_bytes([data[2], data[3]]);
        let sequence_number = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        let acknowledgment_number = u32::from_be_bytes([data[8], data[9], data[10], data[11]]);
        let offset_reserved_flags = u16::from_be_bytes([data[12], data[13]]);

        let data_offset = ((offset_reserved_flags >> DATA_OFFSET_SHIFT) * DATA_OFFSET_UNIT_BYTES) as u8;

        // 有効なTCPヘッダーは最低20バイト。宣言値の検証はペイロードの切り出しより先に行う
        let declared = usize::from(data_offset);
        if declared < TCP_MIN_HEADER_LENGTH {
            return Err(DecodeError::TruncatedHeader {
                layer: Layer::Tcp,
                needed: TCP_MIN_HEADER_LENGTH,
                available: declared,
            });
        }
        if data.len() < declared {
            return Err(DecodeError::TruncatedHeader {
                layer: Layer::Tcp,
                needed: declared,
                available: data.len(),
            });
        }

        // ここからは declared >= 20 かつ data.len() >= declared が保証されている
        let window_size = u16::from_be_bytes([data[14], data[15]]);
        let checksum = u16::from_be_bytes([data[16], data[17]]);
        let urgent_pointer = u16::from_be_bytes([data[18], data[19]]);

        Ok((
            Self {
                source_port,
                destination_port,
                sequence_number,
                acknowledgment_number,
                data_offset,
                flags: TCPFlags::from_word(offset_reserved_flags),
                window_size,
                checksum,
                urgent_pointer,
            },
            &data[declared..],
        ))
    }
}
