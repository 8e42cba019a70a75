use cryptal25519::hash::{Sha512, sha512};
use hex_literal::hex;
use sha2::Digest;

fn sha512_test(input: &[u8]) -> [u8; 64] {
    let got = sha512(input);
    let bytes: &[u8] = got.as_ref();

    let mut arr = [0u8; 64];
    arr.copy_from_slice(bytes);

    arr
}

fn expect_sha512_eq(input: &[u8], expected: &[u8; 64]) {
    let got = sha512_test(input);

    assert_eq!(
        &got, expected,
        "Digest mismatch for input {:?}\nExpected {:?}\nGot      {:?}",
        input, expected, got,
    );
}

// -------------------------------------------------------
// 1. OFFICIAL SHA-512 TEST VECTORS
// -------------------------------------------------------

#[test]
fn sha512_empty_vector() {
    let empty_out = [
        0xcf, 0x83, 0xe1, 0x35, 0x7e, 0xef, 0xb8, 0xbd, 0xf1, 0x54, 0x28, 0x50, 0xd6, 0x6d, 0x80,
        0x07, 0xd6, 0x20, 0xe4, 0x05, 0x0b, 0x57, 0x15, 0xdc, 0x83, 0xf4, 0xa9, 0x21, 0xd3, 0x6c,
        0xe9, 0xce, 0x47, 0xd0, 0xd1, 0x3c, 0x5d, 0x85, 0xf2, 0xb0, 0xff, 0x83, 0x18, 0xd2, 0x87,
        0x7e, 0xec, 0x2f, 0x63, 0xb9, 0x31, 0xbd, 0x47, 0x41, 0x7a, 0x81, 0xa5, 0x38, 0x32, 0x7a,
        0xf9, 0x27, 0xda, 0x3e,
    ];

    expect_sha512_eq(&[], &empty_out);
}

#[test]
fn sha512_abc_vector() {
    let abc_out = [
        0xdd, 0xaf, 0x35, 0xa1, 0x93, 0x61, 0x7a, 0xba, 0xcc, 0x41, 0x73, 0x49, 0xae, 0x20, 0x41,
        0x31, 0x12, 0xe6, 0xfa, 0x4e, 0x89, 0xa9, 0x7e, 0xa2, 0x0a, 0x9e, 0xee, 0xe6, 0x4b, 0x55,
        0xd3, 0x9a, 0x21, 0x92, 0x99, 0x2a, 0x27, 0x4f, 0xc1, 0xa8, 0x36, 0xba, 0x3c, 0x23, 0xa3,
        0xfe, 0xeb, 0xbd, 0x45, 0x4d, 0x44, 0x23, 0x64, 0x3c, 0xe8, 0x0e, 0x2a, 0x9a, 0xc9, 0x4f,
        0xa5, 0x4c, 0xa4, 0x9f,
    ];

    expect_sha512_eq(b"abc", &abc_out);
}

#[test]
fn sha512_known_phrase() {
    let out = [
        0x07, 0xe5, 0x47, 0xd9, 0x58, 0x6f, 0x6a, 0x73, 0xf7, 0x3f, 0xba, 0xc0, 0x43, 0x5e, 0xd7,
        0x69, 0x51, 0x21, 0x8f, 0xb7, 0xd0, 0xc8, 0xd7, 0x88, 0xa3, 0x09, 0xd7, 0x85, 0x43, 0x6b,
        0xbb, 0x64, 0x2e, 0x93, 0xa2, 0x52, 0xa9, 0x54, 0xf2, 0x39, 0x12, 0x54, 0x7d, 0x1e, 0x8a,
        0x3b, 0x5e, 0xd6, 0xe1, 0xbf, 0xd7, 0x09, 0x78, 0x21, 0x23, 0x3f, 0xa0, 0x53, 0x8f, 0x3d,
        0xb8, 0x54, 0xfe, 0xe6,
    ];

    expect_sha512_eq(b"The quick brown fox jumps over the lazy dog", &out);
}

#[test]
fn sha512_two_block_vector() {
    let out = hex!(
        "8e959b75dae313da8cf4f72814fc143f8f7779c6eb9f7fa17299aeadb6889018"
        "501d289e4900f7e4331b99dec4b5433ac7d329eeb6dd26545e96e55b874be909"
    );

    expect_sha512_eq(
        b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu",
        &out,
    );
}

#[test]
fn sha512_million_a() {
    let out = hex!(
        "e718483d0ce769644e2e42c7bc15b4638e1f98b13b2044285632a803afa973eb"
        "de0ff244877ea60a4cb0432ce577c31beb009c5c2c49aa2e4eadb217ad8cc09b"
    );

    expect_sha512_eq(&vec![b'a'; 1_000_000], &out);
}

// -------------------------------------------------------
// 2. ONE-SHOT VS STREAMING, LENGTHS 0 TO 300
// -------------------------------------------------------

#[test]
fn sha512_matches_streaming_hasher() {
    let buf: Vec<u8> = (0..300).map(|i| (i * 7 % 256) as u8).collect();

    for len in [0, 1, 63, 64, 111, 112, 127, 128, 129, 255, 256, 300] {
        let mut hasher = Sha512::new();
        let (head, tail) = buf[..len].split_at(len / 3);
        hasher.update(head);
        hasher.update(tail);

        let streamed = hasher.finalize();
        assert_eq!(&sha512_test(&buf[..len])[..], &streamed[..], "length {len}");
    }
}

#[test]
fn sha512_distinct_inputs_differ() {
    let mut seen = Vec::new();
    for b in 0u8..=255 {
        let digest = sha512_test(&[b]);
        assert!(!seen.contains(&digest), "collision at byte {b}");
        seen.push(digest);
    }
}
