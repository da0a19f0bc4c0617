//! Input report structures for the Sony DualShock 4.
//! Byte layout source: https://www.psdevwiki.com/ps4/DS4-USB
use packed_struct::prelude::*;
use thiserror::Error;

/// Report ID shared by USB and Bluetooth input reports
pub const INPUT_REPORT_ID: u8 = 0x01;
/// Smallest decodable frame: report id, stick axes, and the hat/symbol byte
pub const CORE_REPORT_SIZE: usize = 6;
/// Core frame plus the shoulder/meta button byte
pub const EXTENDED_REPORT_SIZE: usize = 7;

/// Logical d-pad direction flags produced by [Direction::as_bitflag]
pub const DPAD_UP: u8 = 1 << 0;
pub const DPAD_RIGHT: u8 = 1 << 1;
pub const DPAD_DOWN: u8 = 1 << 2;
pub const DPAD_LEFT: u8 = 1 << 3;

/// Possible errors decoding a raw frame
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("malformed frame: got {size} bytes, need at least {minimum}")]
    MalformedFrame { size: usize, minimum: usize },
    #[error("failed to unpack input report: {0}")]
    Unpack(#[from] PackingError),
}

/// Hat switch positions reported in the low nibble of the hat/symbol byte.
/// The controller encodes the d-pad as a single clock position, not as four
/// independent bits.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Debug, Default)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
    #[default]
    None = 8,
}

impl Direction {
    /// Classify a raw hat code. Codes above [Direction::None] are out of
    /// range for the hardware and decode as no direction active.
    pub fn from_code(code: u8) -> Self {
        Self::from_primitive(code).unwrap_or(Self::None)
    }

    /// The set of logical directions active at this hat position. Diagonal
    /// positions activate two directions at once.
    pub fn as_bitflag(&self) -> u8 {
        match *self {
            Self::North => DPAD_UP,
            Self::NorthEast => DPAD_UP | DPAD_RIGHT,
            Self::East => DPAD_RIGHT,
            Self::SouthEast => DPAD_RIGHT | DPAD_DOWN,
            Self::South => DPAD_DOWN,
            Self::SouthWest => DPAD_DOWN | DPAD_LEFT,
            Self::West => DPAD_LEFT,
            Self::NorthWest => DPAD_LEFT | DPAD_UP,
            Self::None => 0,
        }
    }
}

/// Fields shared by every input report shape: the four stick axis bytes and
/// the hat/symbol byte.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "5")]
pub struct InputState {
    // byte 0-3
    #[packed_field(bytes = "0")]
    pub left_stick_x: u8,
    #[packed_field(bytes = "1")]
    pub left_stick_y: u8,
    #[packed_field(bytes = "2")]
    pub right_stick_x: u8,
    #[packed_field(bytes = "3")]
    pub right_stick_y: u8,

    // byte 4
    #[packed_field(bits = "32")]
    pub triangle: bool, // Symbol cluster, □, ✕, ◯, △
    #[packed_field(bits = "33")]
    pub circle: bool,
    #[packed_field(bits = "34")]
    pub cross: bool,
    #[packed_field(bits = "35")]
    pub square: bool,
    /// Raw hat code. Kept as an integer rather than a packed enum so that
    /// out-of-range codes reach [Direction::from_code] instead of failing
    /// the unpack.
    #[packed_field(bits = "36..=39")]
    pub dpad: Integer<u8, packed_bits::Bits<4>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            left_stick_x: 0,
            left_stick_y: 0,
            right_stick_x: 0,
            right_stick_y: 0,
            triangle: false,
            circle: false,
            cross: false,
            square: false,
            dpad: Integer::from_primitive(Direction::None as u8),
        }
    }
}

/// The six-byte frame: the smallest report this decoder accepts.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "6")]
pub struct CoreInputDataReport {
    // byte 0
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    // byte 1-5
    #[packed_field(bytes = "1..=5")]
    pub state: InputState,
}

impl Default for CoreInputDataReport {
    fn default() -> Self {
        Self {
            report_id: INPUT_REPORT_ID,
            state: Default::default(),
        }
    }
}

/// A frame that also carries the shoulder/meta button byte. Real USB
/// (64-byte) and Bluetooth (10+ byte) reports both decode through this
/// shape via their leading bytes.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "7")]
pub struct ExtendedInputDataReport {
    // byte 0
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    // byte 1-5
    #[packed_field(bytes = "1..=5")]
    pub state: InputState,

    // byte 6
    #[packed_field(bits = "48")]
    pub r3: bool,
    #[packed_field(bits = "49")]
    pub l3: bool,
    #[packed_field(bits = "50")]
    pub options: bool,
    #[packed_field(bits = "51")]
    pub share: bool,
    #[packed_field(bits = "52")]
    pub r2: bool, // Digital trigger clicks
    #[packed_field(bits = "53")]
    pub l2: bool,
    #[packed_field(bits = "54")]
    pub r1: bool, // Shoulder buttons
    #[packed_field(bits = "55")]
    pub l1: bool,
}

impl Default for ExtendedInputDataReport {
    fn default() -> Self {
        Self {
            report_id: INPUT_REPORT_ID,
            state: Default::default(),
            r3: false,
            l3: false,
            options: false,
            share: false,
            r2: false,
            l2: false,
            r1: false,
            l1: false,
        }
    }
}

/// DualShock 4 input report, sized by how much of the button area the frame
/// carries.
#[derive(Debug, Copy, Clone)]
pub enum PackedInputDataReport {
    Core(CoreInputDataReport),
    Extended(ExtendedInputDataReport),
}

impl PackedInputDataReport {
    /// Decode a raw frame. Frames shorter than [CORE_REPORT_SIZE] are
    /// rejected; longer frames decode their leading bytes and ignore the
    /// rest (trailer fields this decoder does not model).
    pub fn unpack(buf: &[u8]) -> Result<Self, ReportError> {
        let size = buf.len();
        if size < CORE_REPORT_SIZE {
            return Err(ReportError::MalformedFrame {
                size,
                minimum: CORE_REPORT_SIZE,
            });
        }
        if size == CORE_REPORT_SIZE {
            log::trace!("Got core input report");
            let report = CoreInputDataReport::unpack_from_slice(buf)?;
            return Ok(Self::Core(report));
        }
        log::trace!("Got extended input report");
        let report = ExtendedInputDataReport::unpack_from_slice(&buf[..EXTENDED_REPORT_SIZE])?;
        Ok(Self::Extended(report))
    }

    /// Return the fields shared by both report shapes.
    pub fn state(&self) -> &InputState {
        match self {
            PackedInputDataReport::Core(report) => &report.state,
            PackedInputDataReport::Extended(report) => &report.state,
        }
    }

    /// Return the shoulder/meta button fields, present only on extended
    /// frames.
    pub fn extended(&self) -> Option<&ExtendedInputDataReport> {
        match self {
            PackedInputDataReport::Core(_) => None,
            PackedInputDataReport::Extended(report) => Some(report),
        }
    }
}
