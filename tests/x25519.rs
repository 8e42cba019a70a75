use cryptal25519::keys::x25519::{
    BASEPOINT, clamp, exchange, exchange_contributory, generate, public_key,
};
use cryptal25519::{Error, key_from_random, x25519};

use hex_literal::hex;
use rand::RngCore;

fn random_secret() -> [u8; 32] {
    let mut raw = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut raw);
    raw
}

// -------------------------------------------------------
// FLAT (BIG-ENDIAN) API
// -------------------------------------------------------

#[test]
fn test_x25519_fixture() {
    let mut scalar = hex!("ebe088ff278b2f1cfdb6182629b13b6fe60e80838b7fe1794b8a4a627e08ab5d");
    let u = hex!("6a4e9baa8ea9a4ebf41a38260d3abf0d5af73eb4dc7d8b7454a7308909f02085");
    let expected = hex!("4217161e3c9bf076339ed147c9217ee0250f3580f43b8e72e12dcea45b9d5d4a");

    assert_eq!(x25519(&scalar, &u), expected);

    // Clamping first is a no-op for the ladder.
    key_from_random(&mut scalar);
    assert_eq!(
        scalar,
        hex!("6be088ff278b2f1cfdb6182629b13b6fe60e80838b7fe1794b8a4a627e08ab58")
    );
    assert_eq!(x25519(&scalar, &u), expected);
}

#[test]
fn test_key_from_random_is_idempotent() {
    let mut raw = random_secret();
    key_from_random(&mut raw);

    let once = raw;
    key_from_random(&mut raw);
    assert_eq!(raw, once);

    assert_eq!(raw[31] & 7, 0);
    assert_eq!(raw[0] & 0xc0, 0x40);
}

#[test]
fn test_flat_top_bit_of_u_is_ignored() {
    let scalar = random_secret();
    let mut u = hex!("6a4e9baa8ea9a4ebf41a38260d3abf0d5af73eb4dc7d8b7454a7308909f02085");
    let plain = x25519(&scalar, &u);

    u[0] |= 0x80;
    assert_eq!(x25519(&scalar, &u), plain);
}

#[test]
fn test_flat_diffie_hellman_commutes() {
    let mut base = [0u8; 32];
    base[31] = 9;

    let mut a = random_secret();
    let mut b = random_secret();
    key_from_random(&mut a);
    key_from_random(&mut b);

    let a_public = x25519(&a, &base);
    let b_public = x25519(&b, &base);

    assert_eq!(x25519(&a, &b_public), x25519(&b, &a_public));
}

// -------------------------------------------------------
// RFC 7748 (LITTLE-ENDIAN) API
// -------------------------------------------------------

const ALICE_SECRET: [u8; 32] =
    hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
const ALICE_PUBLIC: [u8; 32] =
    hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
const BOB_SECRET: [u8; 32] =
    hex!("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
const BOB_PUBLIC: [u8; 32] =
    hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
const SHARED: [u8; 32] =
    hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");

#[test]
fn test_rfc7748_alice_and_bob() {
    assert_eq!(public_key(&ALICE_SECRET), ALICE_PUBLIC);
    assert_eq!(public_key(&BOB_SECRET), BOB_PUBLIC);

    assert_eq!(exchange(&ALICE_SECRET, &BOB_PUBLIC), SHARED);
    assert_eq!(exchange(&BOB_SECRET, &ALICE_PUBLIC), SHARED);
}

#[test]
fn test_fixture_is_rfc7748_with_reversed_bytes() {
    let mut scalar = hex!("ebe088ff278b2f1cfdb6182629b13b6fe60e80838b7fe1794b8a4a627e08ab5d");
    let mut u = hex!("6a4e9baa8ea9a4ebf41a38260d3abf0d5af73eb4dc7d8b7454a7308909f02085");
    let mut out = hex!("4217161e3c9bf076339ed147c9217ee0250f3580f43b8e72e12dcea45b9d5d4a");
    scalar.reverse();
    u.reverse();
    out.reverse();

    assert_eq!(scalar, BOB_SECRET);
    assert_eq!(u, ALICE_PUBLIC);
    assert_eq!(out, SHARED);
}

#[test]
fn test_x25519_key_exchange() {
    let mut rng = rand::thread_rng();
    let alice = generate(&mut rng);
    let bob = generate(&mut rng);

    let alice_shared = exchange(&alice, &public_key(&bob));
    let bob_shared = exchange(&bob, &public_key(&alice));

    assert_eq!(alice_shared, bob_shared);
    assert_eq!(exchange_contributory(&alice, &public_key(&bob)), Ok(alice_shared));
}

#[test]
fn test_clamping_is_applied_internally() {
    let raw = random_secret();
    assert_eq!(public_key(&raw), public_key(&clamp(raw)));
    assert_eq!(exchange(&raw, &BOB_PUBLIC), exchange(&clamp(raw), &BOB_PUBLIC));
}

#[test]
fn test_exchange_with_basepoint_matches_public_key() {
    let secret = random_secret();
    assert_eq!(exchange(&secret, &BASEPOINT), public_key(&secret));
}

// -------------------------------------------------------
// LOW-ORDER INPUTS
// -------------------------------------------------------

#[test]
fn test_low_order_points_give_zero() {
    let low_order = [
        [0u8; 32],
        {
            let mut one = [0u8; 32];
            one[0] = 1;
            one
        },
        hex!("e0eb7a7c3b41b8ae1656e3faf19fc46ada098deb9c32b1fd866205165f49b800"),
    ];

    let secret = random_secret();
    for point in low_order {
        assert_eq!(exchange(&secret, &point), [0u8; 32]);
        assert_eq!(
            exchange_contributory(&secret, &point),
            Err(Error::NonContributory)
        );
    }
}
