// Identifier value objects
//
// Ticket and walk-in codes are short, upper-case, and drawn from an alphabet
// without the look-alike characters I, O, 0 and 1.

use rand::Rng;

pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const TICKET_ID_LEN: usize = 8;
pub const WALK_IN_ID_PREFIX: char = 'W';
pub const WALK_IN_ID_LEN: usize = 8;

/// Generates a fresh ticket code. Ticket codes never start with the walk-in
/// prefix, so the two namespaces cannot collide.
pub fn generate_ticket_id() -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(TICKET_ID_LEN);
    while out.is_empty() {
        let ch = random_code_char(&mut rng);
        if ch != WALK_IN_ID_PREFIX {
            out.push(ch);
        }
    }
    while out.len() < TICKET_ID_LEN {
        out.push(random_code_char(&mut rng));
    }
    out
}

pub fn generate_walk_in_id() -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(WALK_IN_ID_LEN);
    out.push(WALK_IN_ID_PREFIX);
    while out.len() < WALK_IN_ID_LEN {
        out.push(random_code_char(&mut rng));
    }
    out
}

/// Canonical form used for case-insensitive id comparison.
pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

pub fn codes_match(a: &str, b: &str) -> bool {
    normalize_code(a) == normalize_code(b)
}

pub fn is_walk_in_id(value: &str) -> bool {
    normalize_code(value).starts_with(WALK_IN_ID_PREFIX)
}

fn random_code_char(rng: &mut impl Rng) -> char {
    CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char
}
