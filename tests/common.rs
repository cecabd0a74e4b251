#![cfg(feature = "std")]

use std::{io::Read, path::Path};

use csv::ReaderBuilder;
use ihexline::{
    avec::{self, FromRecords},
    sans::record,
};
use tinyvec::ArrayVec;

const PATH: &str = "fixtures/blink.hex";

#[test]
fn decode_slice_image() {
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_crlf_image() {
    let data = std::fs::read_to_string(PATH).unwrap().replace('\n', "\r\n");
    let mut validator = Validator::new(PATH);
    avec::decode_slice(data.as_bytes(), &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_ignores_trailing_bytes() {
    let mut data = std::fs::read(PATH).unwrap();
    data.extend_from_slice(b"not a record\n");
    let mut validator = Validator::new(PATH);
    avec::decode_slice(&data, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_missing_end_of_file() {
    let data = std::fs::read_to_string(PATH).unwrap();
    let data = data.trim_end().trim_end_matches(":00000001FF");
    let mut validator = Validator::new(PATH);

    let err = avec::decode_slice(data.as_bytes(), &mut validator).unwrap_err();
    assert!(matches!(err, avec::slice::Error::EndOfSlice));
    validator.finish();
}

#[test]
fn decode_slice_without_final_line_feed() {
    let data = std::fs::read_to_string(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    avec::decode_slice(data.trim_end().as_bytes(), &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_unterminated_data_record() {
    let mut published = Vec::new();

    let err = avec::decode_slice(b":0100000001FE", &mut |address: u32, data: &[u8]| {
        published.push((address, data.to_vec()));
    })
    .unwrap_err();

    assert!(matches!(err, avec::slice::Error::EndOfSlice));
    assert_eq!(published, [(0, vec![0x01])]);
}

#[test]
fn decode_slice_corrupt_record() {
    // Flip a payload digit in the third data record.
    let data = std::fs::read_to_string(PATH).unwrap();
    let data = data.replacen(":100020003460", ":100020003461", 1);
    let mut validator = Validator::new(PATH);

    let err = avec::decode_slice(data.as_bytes(), &mut validator).unwrap_err();
    assert!(matches!(
        err,
        avec::slice::Error::Record(record::Error::ChecksumMismatch)
    ));
    // Records before the corrupt one were published.
    assert_eq!(validator.expected.len(), 4);
}

#[test]
fn decode_slice_into_array() {
    let data = std::fs::read(PATH).unwrap();
    let mut bytes = ArrayVec::<[u8; 128]>::new();
    let mut count = 0;

    avec::decode_slice(&data, &mut |_: u32, data: &[u8]| {
        bytes.extend_from_slice(data);
        count += 1;
    })
    .unwrap();

    let expected: String = Validator::new(PATH)
        .expected
        .into_iter()
        .map(|(_, data)| data)
        .collect();

    assert_eq!(count, 6);
    assert_eq!(hex_string(&bytes), expected);
}

#[test]
fn decode_reader_image() {
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_byte_at_a_time() {
    let data = std::fs::read(PATH).unwrap();
    let mut reader = Trickle(&data);
    let mut validator = Validator::new(PATH);
    avec::decode_reader(&mut reader, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_without_final_line_feed() {
    let data = std::fs::read_to_string(PATH).unwrap();
    let mut reader = data.trim_end().as_bytes();
    let mut validator = Validator::new(PATH);
    avec::decode_reader(&mut reader, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_byte_at_a_time_without_final_line_feed() {
    let data = b":0100000001FE\n:00000001FF";
    let mut published = Vec::new();

    avec::decode_reader(&mut Trickle(data), &mut |address: u32, data: &[u8]| {
        published.push((address, data.to_vec()));
    })
    .unwrap();

    assert_eq!(published, [(0, vec![0x01])]);
}

#[test]
fn decode_reader_missing_end_of_file() {
    let data = std::fs::read(PATH).unwrap();
    let mut reader = &data[..data.len() - b":00000001FF\n".len()];
    let mut validator = Validator::new(PATH);

    let err = avec::decode_reader(&mut reader, &mut validator).unwrap_err();
    assert!(matches!(err, avec::reader::Error::EndOfReader));
    validator.finish();
}

#[test]
fn decode_reader_line_too_long() {
    let mut data = vec![b':'];
    data.resize(1024, b'0');
    let mut validator = Validator::new(PATH);

    let err = avec::decode_reader(&mut data.as_slice(), &mut validator).unwrap_err();
    assert!(matches!(
        err,
        avec::reader::Error::Record(record::Error::LineTooLong)
    ));
}

/// A reader yielding one byte per call.
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match (self.0.split_first(), buf.first_mut()) {
            (Some((&b, rest)), Some(out)) => {
                *out = b;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// Checks published records against the rows of a CSV file beside the image.
struct Validator {
    expected: Vec<(String, String)>,
}

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_string(), r[1].to_string())
            })
            .collect();

        Self { expected }
    }

    fn finish(self) {
        assert!(self.expected.is_empty(), "missing records: {:?}", self.expected);
    }
}

impl FromRecords for Validator {
    fn add_data(&mut self, address: u32, data: &[u8]) {
        let (expected_address, expected_data) = self.expected.remove(0);
        assert_eq!(format!("{address:08X}"), expected_address);
        assert_eq!(hex_string(data), expected_data);
    }
}

fn hex_string(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02X}")).collect()
}
