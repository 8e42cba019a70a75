use cryptal25519::curve::{CompressedEdwardsY, EdwardsPoint, Scalar};
use cryptal25519::hash::sha512;
use cryptal25519::keys::ed25519::{PrivateKey, PublicKey, Signature};
use cryptal25519::keys::x25519;
use cryptal25519::{Error, publickey, sign, sign_open};

use hex_literal::hex;
use rand::RngCore;

const SEED_1: [u8; 32] = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
const SEED_2: [u8; 32] = hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
const SEED_3: [u8; 32] = hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7");

/// ℓ in little-endian bytes.
const GROUP_ORDER: [u8; 32] = hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    rand::thread_rng().fill_bytes(&mut out);
    out
}

// -------------------------------------------------------
// RFC 8032 §7.1 VECTORS
// -------------------------------------------------------

#[test]
fn test_rfc8032_vector_1() {
    let public = publickey(&SEED_1);
    assert_eq!(
        public,
        hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
    );

    let signature = sign(b"", &SEED_1, &public);
    assert_eq!(
        signature,
        hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
            "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        )
    );

    assert_eq!(sign_open(b"", &signature, &public), Ok(()));
}

#[test]
fn test_rfc8032_vector_2() {
    let public = publickey(&SEED_2);
    assert_eq!(
        public,
        hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c")
    );

    let signature = sign(&[0x72], &SEED_2, &public);
    assert_eq!(
        signature,
        hex!(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da"
            "085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        )
    );

    assert_eq!(sign_open(&[0x72], &signature, &public), Ok(()));
}

#[test]
fn test_rfc8032_vector_3() {
    let key = PrivateKey::from_seed(&SEED_3);
    assert_eq!(
        key.public_key().to_bytes(),
        hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025")
    );

    let message = hex!("af82");
    let signature = key.sign(&message);
    assert_eq!(
        signature.to_bytes(),
        hex!(
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac"
            "18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
        )
    );

    assert_eq!(key.public_key().verify(&message, &signature), Ok(()));
}

// -------------------------------------------------------
// SIGN / VERIFY PROPERTIES
// -------------------------------------------------------

#[test]
fn test_publickey_is_deterministic() {
    let seed = random_bytes::<32>();
    assert_eq!(publickey(&seed), publickey(&seed));
    assert_eq!(publickey(&seed), PrivateKey::from_seed(&seed).public_key().to_bytes());
}

#[test]
fn test_sign_and_verify_random() {
    for len in [0usize, 1, 31, 64, 200] {
        let seed = random_bytes::<32>();
        let mut message = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut message);

        let public = publickey(&seed);
        let signature = sign(&message, &seed, &public);

        assert_eq!(
            sign_open(&message, &signature, &public),
            Ok(()),
            "signature should be valid"
        );
    }
}

#[test]
fn test_signing_is_deterministic() {
    let key = PrivateKey::generate(&mut rand::thread_rng());
    assert_eq!(key.sign(b"same message"), key.sign(b"same message"));
}

#[test]
fn test_tampering_is_detected() {
    let seed = random_bytes::<32>();
    let public = publickey(&seed);
    let message = b"Hello, world!";
    let signature = sign(message, &seed, &public);

    let mut bad_s = signature;
    bad_s[44] ^= 0x10;
    assert_eq!(
        sign_open(message, &bad_s, &public),
        Err(Error::VerificationFailed),
        "signature modification must be detected"
    );

    let mut bad_r = signature;
    bad_r[3] ^= 0x01;
    assert_eq!(sign_open(message, &bad_r, &public), Err(Error::VerificationFailed));

    assert_eq!(
        sign_open(b"Hello, world?", &signature, &public),
        Err(Error::VerificationFailed),
        "message modification must be detected"
    );

    let other = publickey(&random_bytes::<32>());
    assert_eq!(sign_open(message, &signature, &other), Err(Error::VerificationFailed));
}

#[test]
fn test_non_canonical_s_is_rejected() {
    let public = publickey(&SEED_1);
    let signature = sign(b"", &SEED_1, &public);

    // S + ℓ encodes the same residue but must not verify.
    let mut malleated = signature;
    let mut carry = 0u16;
    for (byte, l) in malleated[32..].iter_mut().zip(GROUP_ORDER) {
        let sum = *byte as u16 + l as u16 + carry;
        *byte = sum as u8;
        carry = sum >> 8;
    }
    assert_eq!(carry, 0);

    assert_eq!(sign_open(b"", &malleated, &public), Err(Error::VerificationFailed));
}

#[test]
fn test_invalid_public_key_is_encoding_error() {
    let signature = sign(b"msg", &SEED_1, &publickey(&SEED_1));

    // y = 2 is not the y-coordinate of any curve point.
    let mut bad_key = [0u8; 32];
    bad_key[0] = 2;

    assert_eq!(sign_open(b"msg", &signature, &bad_key), Err(Error::InvalidEncoding));
    assert_eq!(PublicKey::from_bytes(&bad_key), Err(Error::InvalidEncoding));
}

#[test]
fn test_mismatched_public_key_uses_derived_key() {
    let wrong = publickey(&SEED_2);
    let signature = sign(b"payload", &SEED_1, &wrong);

    assert_eq!(signature, sign(b"payload", &SEED_1, &publickey(&SEED_1)));
    assert_eq!(sign_open(b"payload", &signature, &publickey(&SEED_1)), Ok(()));
}

// -------------------------------------------------------
// POINT ENCODING AND GROUP LAWS
// -------------------------------------------------------

#[test]
fn test_decode_encode_is_idempotent() {
    let mut accepted = 0;

    for _ in 0..64 {
        let bytes = random_bytes::<32>();
        if let Ok(point) = CompressedEdwardsY(bytes).decompress() {
            accepted += 1;
            assert_eq!(point.compress().to_bytes(), bytes);
        }
    }

    // About half of all y-coordinates lie on the curve.
    assert!(accepted > 0);
}

#[test]
fn test_encode_decode_roundtrip() {
    let k = Scalar::from_bytes_mod_order(random_bytes::<32>());
    let point = EdwardsPoint::mul_base(&k);

    let decoded = point.compress().decompress().expect("encoded point decodes");
    assert_eq!(decoded, point);
}

#[test]
fn test_edwards_diffie_hellman_commutes() {
    let k1 = Scalar::from_bytes_mod_order_wide(&random_bytes::<64>());
    let k2 = Scalar::from_bytes_mod_order_wide(&random_bytes::<64>());

    let p1 = EdwardsPoint::mul_base(&k1);
    let p2 = EdwardsPoint::mul_base(&k2);

    assert_eq!(&p2 * &k1, &p1 * &k2);
    assert_eq!((p2 * k1).compress(), (p1 * k2).compress());
}

// -------------------------------------------------------
// CONVERSIONS
// -------------------------------------------------------

#[test]
fn test_public_key_to_montgomery() {
    let cases = [
        (
            SEED_1,
            hex!("d85e07ec22b0ad881537c2f44d662d1a143cf830c57aca4305d85c7a90f6b62e"),
        ),
        (
            SEED_2,
            hex!("25c704c594b88afc00a76b69d1ed2b984d7e22550f3ed0802d04fbcd07d38d47"),
        ),
    ];

    for (seed, expected) in cases {
        let public = PrivateKey::from_seed(&seed).public_key();
        assert_eq!(public.to_montgomery().to_bytes(), expected);
    }
}

#[test]
fn test_montgomery_image_matches_x25519_of_expanded_secret() {
    let seed = random_bytes::<32>();
    let digest = sha512(&seed);

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&digest[..32]);

    let public = PublicKey::from_bytes(&publickey(&seed)).expect("derived key decodes");
    assert_eq!(public.to_montgomery().to_bytes(), x25519::public_key(&secret));
}

#[test]
fn test_slice_constructors_check_length() {
    assert_eq!(
        PublicKey::try_from(&[0u8; 31][..]),
        Err(Error::InvalidLength { expected: 32, got: 31 })
    );
    assert_eq!(
        Signature::try_from(&[0u8; 63][..]),
        Err(Error::InvalidLength { expected: 64, got: 63 })
    );
    assert!(matches!(
        PrivateKey::try_from(&[0u8; 33][..]),
        Err(Error::InvalidLength { expected: 32, got: 33 })
    ));

    let key = PrivateKey::try_from(&SEED_1[..]).expect("32-byte seed");
    assert_eq!(key.public_key().to_bytes(), publickey(&SEED_1));
    assert_eq!(key.seed(), &SEED_1);

    let signature = key.sign(b"slice");
    let parsed = Signature::try_from(&signature.to_bytes()[..]).expect("64-byte signature");
    assert_eq!(parsed, signature);
}
