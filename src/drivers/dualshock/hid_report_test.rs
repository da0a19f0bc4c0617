use std::error::Error;

use packed_struct::prelude::*;

use super::hid_report::{
    CoreInputDataReport, Direction, ExtendedInputDataReport, PackedInputDataReport, ReportError,
    CORE_REPORT_SIZE, DPAD_DOWN, DPAD_LEFT, DPAD_RIGHT, DPAD_UP,
};

/// Hat codes at which each logical direction is active
const UP_CODES: [u8; 3] = [0, 1, 7];
const RIGHT_CODES: [u8; 3] = [1, 2, 3];
const DOWN_CODES: [u8; 3] = [3, 4, 5];
const LEFT_CODES: [u8; 3] = [5, 6, 7];

#[test]
fn test_direction_membership() {
    for code in 0..=15u8 {
        let flags = Direction::from_code(code).as_bitflag();
        assert_eq!(
            flags & DPAD_UP != 0,
            UP_CODES.contains(&code),
            "up at code {code}"
        );
        assert_eq!(
            flags & DPAD_RIGHT != 0,
            RIGHT_CODES.contains(&code),
            "right at code {code}"
        );
        assert_eq!(
            flags & DPAD_DOWN != 0,
            DOWN_CODES.contains(&code),
            "down at code {code}"
        );
        assert_eq!(
            flags & DPAD_LEFT != 0,
            LEFT_CODES.contains(&code),
            "left at code {code}"
        );
    }
}

#[test]
fn test_unpack_core_frame() {
    let buf = [0x01, 0x40, 0x80, 0xC0, 0x20, 0x28];
    let report = PackedInputDataReport::unpack(&buf).unwrap();

    let state = report.state();
    assert_eq!(state.left_stick_x, 0x40);
    assert_eq!(state.left_stick_y, 0x80);
    assert_eq!(state.right_stick_x, 0xC0);
    assert_eq!(state.right_stick_y, 0x20);
    assert!(state.cross);
    assert!(!state.square && !state.circle && !state.triangle);
    assert_eq!(state.dpad.to_primitive(), 8);

    // Six-byte frames carry no shoulder byte
    assert!(report.extended().is_none());
}

#[test]
fn test_unpack_extended_frame() {
    let buf = [0x01, 0x80, 0x7F, 0x00, 0xFF, 0x91, 0x03];
    let report = PackedInputDataReport::unpack(&buf).unwrap();

    let state = report.state();
    assert!(state.triangle && state.square);
    assert!(!state.circle && !state.cross);
    assert_eq!(state.dpad.to_primitive(), 1);

    let extended = report.extended().unwrap();
    assert!(extended.l1 && extended.r1);
    assert!(!extended.l2 && !extended.r2);
    assert!(!extended.share && !extended.options);
    assert!(!extended.l3 && !extended.r3);
}

#[test]
fn test_unpack_usb_length_frame() {
    // Full 64-byte USB report; everything past the button area is ignored
    let mut buf = [0xFF; 64];
    buf[..7].copy_from_slice(&[0x01, 0x10, 0x20, 0x30, 0x40, 0x48, 0x02]);
    let report = PackedInputDataReport::unpack(&buf).unwrap();

    let state = report.state();
    assert_eq!(state.left_stick_x, 0x10);
    assert!(state.circle);
    assert_eq!(state.dpad.to_primitive(), 8);
    assert!(report.extended().unwrap().r1);
}

#[test]
fn test_unpack_short_frame_fails() {
    let err = PackedInputDataReport::unpack(&[0x01, 0x00, 0x00]).unwrap_err();
    assert!(matches!(
        err,
        ReportError::MalformedFrame {
            size: 3,
            minimum: CORE_REPORT_SIZE
        }
    ));

    let err = PackedInputDataReport::unpack(&[]).unwrap_err();
    assert!(matches!(err, ReportError::MalformedFrame { size: 0, .. }));
}

#[test]
fn test_default_reports_are_neutral() {
    let report = CoreInputDataReport::default();
    assert_eq!(report.state.dpad.to_primitive(), Direction::None as u8);
    assert!(!report.state.cross);

    let report = ExtendedInputDataReport::default();
    assert!(!report.l1 && !report.r1);
}

#[tokio::test]
async fn test_pack_report() -> Result<(), Box<dyn Error>> {
    let mut report = ExtendedInputDataReport::default();
    report.state.left_stick_x = 127;
    report.state.left_stick_y = 127;
    report.state.right_stick_x = 255;
    report.state.cross = true;
    report.state.dpad = Integer::from_primitive(Direction::NorthEast as u8);
    report.l1 = true;

    let packed = report.pack()?;
    assert_eq!(packed, [0x01, 127, 127, 255, 0, 0x21, 0x01]);

    let unpacked = PackedInputDataReport::unpack(&packed)?;
    assert_eq!(*unpacked.state(), report.state);

    Ok(())
}
