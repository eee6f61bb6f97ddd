//! End-to-end round-trip tests covering the concrete scenarios listed
//! this format's design.

use parahuff_device::FixedDevice;
use parahuff_huffman::{compress, decompress};

fn plenty_of_memory() -> FixedDevice {
    FixedDevice::new(512 * 1024 * 1024, 1024 * 1024 * 1024)
}

#[test]
fn test_scenario_1_aaaa() {
    let data = b"aaaa";
    let container = compress(data, &plenty_of_memory()).unwrap();
    assert_eq!(&container[0..4], &4u32.to_le_bytes());
    let a_index = 4 + b'a' as usize * 4;
    assert_eq!(&container[a_index..a_index + 4], &4u32.to_le_bytes());
    assert_eq!(container[4 + 256 * 4], 0x00);

    let (out, warning) = decompress(&container).unwrap();
    assert_eq!(out, data);
    assert!(warning.is_none());
}

#[test]
fn test_scenario_2_ab() {
    let data = b"ab";
    let container = compress(data, &plenty_of_memory()).unwrap();
    assert_eq!(container[4 + 256 * 4], 0x40);

    let (out, warning) = decompress(&container).unwrap();
    assert_eq!(out, data);
    assert!(warning.is_none());
}

#[test]
fn test_scenario_3_abracadabra() {
    let data = b"abracadabra";
    let container = compress(data, &plenty_of_memory()).unwrap();
    let (out, warning) = decompress(&container).unwrap();
    assert_eq!(out, data);
    assert!(warning.is_none());
}

#[test]
fn test_scenario_4_256_distinct_bytes() {
    let data: Vec<u8> = (0u16..256).map(|b| b as u8).collect();
    let container = compress(&data, &plenty_of_memory()).unwrap();

    // Every code is exactly 8 bits for this perfectly balanced tree
    // (256 equal-weight leaves under the stable-sort merge rule), so
    // the payload is exactly 256 bytes.
    let payload_len = container.len() - (4 + 256 * 4);
    assert_eq!(payload_len, 256);

    let (out, warning) = decompress(&container).unwrap();
    assert_eq!(out, data);
    assert!(warning.is_none());
}

#[test]
fn test_scenario_5_large_random_buffer_k1_o0() {
    let mut seed: u64 = 0x243F6A8885A308D3;
    let data: Vec<u8> = (0..2 * 1024 * 1024)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 33) as u8
        })
        .collect();
    let container = compress(&data, &plenty_of_memory()).unwrap();
    let (out, warning) = decompress(&container).unwrap();
    assert_eq!(out, data);
    assert!(warning.is_none());
}

#[test]
fn test_skewed_distribution_round_trip() {
    let mut data = Vec::new();
    data.extend(std::iter::repeat_n(b'e', 1000));
    data.extend(std::iter::repeat_n(b't', 400));
    data.extend(std::iter::repeat_n(b'z', 3));
    data.extend(std::iter::repeat_n(b'q', 1));
    let container = compress(&data, &plenty_of_memory()).unwrap();
    let (out, warning) = decompress(&container).unwrap();
    assert_eq!(out, data);
    assert!(warning.is_none());
}

#[test]
fn test_single_byte_input() {
    let data = b"x";
    let container = compress(data, &plenty_of_memory()).unwrap();
    let (out, warning) = decompress(&container).unwrap();
    assert_eq!(out, data);
    assert!(warning.is_none());
}
