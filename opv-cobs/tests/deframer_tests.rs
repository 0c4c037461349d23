mod support;

use std::cell::RefCell;
use std::rc::Rc;

use opv_cobs::{CobsDeframer, FRAME_PAYLOAD_BYTES, IP_MTU, MIN_PACKET_LEN};
use support::{chunks, encode_packet};

type Deliveries = Rc<RefCell<Vec<Vec<u8>>>>;

fn deframer_with_sink() -> (CobsDeframer, Deliveries) {
    let deliveries: Deliveries = Rc::new(RefCell::new(Vec::new()));
    let captured = deliveries.clone();
    let mut deframer = CobsDeframer::new();
    deframer.set_sink(move |bytes: &[u8], _len: usize| captured.borrow_mut().push(bytes.to_vec()));
    (deframer, deliveries)
}

#[test]
fn all_zero_frame_yields_no_deliveries() {
    let (mut deframer, deliveries) = deframer_with_sink();
    deframer.push(&[0u8; FRAME_PAYLOAD_BYTES]);
    assert!(deliveries.borrow().is_empty());
}

#[test]
fn single_packet_mid_frame() {
    let (mut deframer, deliveries) = deframer_with_sink();
    let data = b"123456789012345678901234567890";
    assert_eq!(data.len(), 30);

    let mut frame = vec![0u8; FRAME_PAYLOAD_BYTES];
    frame[50] = (data.len() + 1) as u8;
    frame[51..51 + data.len()].copy_from_slice(data);
    // frame[51 + data.len()] is already 0 from the fill, acting as the delimiter.

    deframer.push(&frame);

    let got = deliveries.borrow();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0], data);
}

#[test]
fn minimum_length_packet_of_twenty_bytes() {
    let (mut deframer, deliveries) = deframer_with_sink();
    let data = b"12345678901234567890";
    assert_eq!(data.len(), MIN_PACKET_LEN);

    let mut frame = vec![0u8; FRAME_PAYLOAD_BYTES];
    frame[50] = (data.len() + 1) as u8;
    frame[51..51 + data.len()].copy_from_slice(data);

    deframer.push(&frame);

    let got = deliveries.borrow();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].len(), 20);
    assert_eq!(got[0], data);
}

#[test]
fn undersize_packet_of_nineteen_bytes_is_dropped() {
    let (mut deframer, deliveries) = deframer_with_sink();
    let data = b"1234567890123456789";
    assert_eq!(data.len(), MIN_PACKET_LEN - 1);

    let mut frame = vec![0u8; FRAME_PAYLOAD_BYTES];
    frame[50] = (data.len() + 1) as u8;
    frame[51..51 + data.len()].copy_from_slice(data);

    deframer.push(&frame);

    assert!(deliveries.borrow().is_empty());
}

#[test]
fn packet_straddling_two_frames() {
    let (mut deframer, deliveries) = deframer_with_sink();
    let data = b"123456789012345678901234567890";
    assert_eq!(data.len(), 30);

    let mut first = vec![0u8; FRAME_PAYLOAD_BYTES];
    first[FRAME_PAYLOAD_BYTES - 11] = (data.len() + 1) as u8;
    first[FRAME_PAYLOAD_BYTES - 10..].copy_from_slice(&data[..10]);
    deframer.push(&first);
    assert!(deliveries.borrow().is_empty(), "returned a partial packet");

    let mut second = vec![0u8; FRAME_PAYLOAD_BYTES];
    second[..20].copy_from_slice(&data[10..]);
    second[20] = 0;
    deframer.push(&second);

    let got = deliveries.borrow();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0], data);
}

#[test]
fn packet_filling_an_entire_frame_repeats_cleanly() {
    let (mut deframer, deliveries) = deframer_with_sink();

    let mut frame = vec![b'A'; FRAME_PAYLOAD_BYTES];
    frame[0] = (FRAME_PAYLOAD_BYTES - 1) as u8;
    frame[FRAME_PAYLOAD_BYTES - 1] = 0;

    for expected_count in 1..=3 {
        deframer.push(&frame);
        let got = deliveries.borrow();
        assert_eq!(got.len(), expected_count);
        let last = got.last().unwrap();
        assert_eq!(last.len(), FRAME_PAYLOAD_BYTES - 2);
        assert!(last.iter().all(|&b| b == b'A'));
    }
}

fn push_encoded_packet_in_frames(deframer: &mut CobsDeframer, payload: &[u8]) {
    let encoded = encode_packet(payload);
    for chunk in chunks(&encoded, FRAME_PAYLOAD_BYTES) {
        deframer.push(chunk);
    }
}

#[test]
fn packet_of_mtu_minus_one_round_trips() {
    let (mut deframer, deliveries) = deframer_with_sink();
    let payload: Vec<u8> = (0..IP_MTU - 1).map(|i| (i % 256) as u8).collect();

    push_encoded_packet_in_frames(&mut deframer, &payload);

    let got = deliveries.borrow();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0], payload);
}

#[test]
fn packet_of_exactly_mtu_round_trips() {
    let (mut deframer, deliveries) = deframer_with_sink();
    let payload: Vec<u8> = (0..IP_MTU).map(|i| (i % 256) as u8).collect();

    push_encoded_packet_in_frames(&mut deframer, &payload);

    let got = deliveries.borrow();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0], payload);
}

#[test]
fn packet_of_mtu_plus_one_is_discarded() {
    let (mut deframer, deliveries) = deframer_with_sink();
    let payload: Vec<u8> = (0..IP_MTU + 1).map(|i| (i % 256) as u8).collect();

    push_encoded_packet_in_frames(&mut deframer, &payload);

    assert!(deliveries.borrow().is_empty());
}

#[test]
fn long_run_chaining_with_random_payload() {
    let (mut deframer, deliveries) = deframer_with_sink();
    fastrand::seed(42);
    let payload: Vec<u8> = (0..500).map(|_| fastrand::u8(..)).collect();
    // A 500-byte payload forces at least one 0xFF (254-byte) code byte.

    push_encoded_packet_in_frames(&mut deframer, &payload);

    let got = deliveries.borrow();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0], payload);
}

#[test]
fn corruption_recovery_after_unexpected_zero_mid_run() {
    let (mut deframer, deliveries) = deframer_with_sink();

    // A run of 10 literal bytes, code byte says 11, but we inject a zero
    // after only 3 of them -- an unexpected packet delimiter mid-run.
    let corrupt = [11u8, b'a', b'b', b'c', 0u8];
    deframer.push(&corrupt);
    assert!(deliveries.borrow().is_empty());

    let good_payload = b"valid-packet-payload".to_vec();
    assert!(good_payload.len() >= MIN_PACKET_LEN);
    push_encoded_packet_in_frames(&mut deframer, &good_payload);

    let got = deliveries.borrow();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0], good_payload);
}

#[test]
fn reset_is_idempotent() {
    let mut deframer = CobsDeframer::new();
    deframer.push(&[10, b'h', b'e']); // code byte promises 9 literal bytes, only 2 arrived
    deframer.reset();
    let after_one = format!("{deframer:?}");
    deframer.reset();
    let after_two = format!("{deframer:?}");
    assert_eq!(after_one, after_two);
}

#[test]
fn missing_sink_drops_completed_packet_without_panicking() {
    let mut deframer = CobsDeframer::new();
    let payload: Vec<u8> = (0..30).map(|i| (i + 1) as u8).collect();
    let encoded = encode_packet(&payload);
    deframer.push(&encoded); // no sink registered; must not panic
}

#[test]
fn frame_boundary_independence() {
    let payload: Vec<u8> = (0..900).map(|i| (i * 7 % 256) as u8).collect();
    let encoded = encode_packet(&payload);

    let (mut whole, whole_out) = deframer_with_sink();
    whole.push(&encoded);

    for chunk_len in [1usize, 2, 3, 7, 64, FRAME_PAYLOAD_BYTES] {
        let (mut chunked, chunked_out) = deframer_with_sink();
        for chunk in chunks(&encoded, chunk_len) {
            chunked.push(chunk);
        }
        assert_eq!(*whole_out.borrow(), *chunked_out.borrow(), "chunk_len={chunk_len}");
    }
}

#[test]
fn stream_order_is_preserved_across_several_packets() {
    let (mut deframer, deliveries) = deframer_with_sink();
    let payloads: Vec<Vec<u8>> = (0..5)
        .map(|n| (0..MIN_PACKET_LEN + n * 3).map(|i| ((i + n) % 256) as u8).collect())
        .collect();

    let mut stream = Vec::new();
    for payload in &payloads {
        stream.extend(encode_packet(payload));
    }
    deframer.push(&stream);

    assert_eq!(*deliveries.borrow(), payloads);
}
