use rand::Rng;

pub const GROUP_ID_LEN: usize = 6;
pub const GROUP_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// 生成群组码，与现存群组冲突时整体重新生成
pub fn generate_group_id<R, F>(rng: &mut R, is_taken: F) -> String
where
    R: Rng,
    F: Fn(&str) -> bool,
{
    loop {
        let id: String = (0..GROUP_ID_LEN)
            .map(|_| GROUP_ID_ALPHABET[rng.gen_range(0..GROUP_ID_ALPHABET.len())] as char)
            .collect();

        if !is_taken(&id) {
            return id;
        }
        tracing::debug!("Group id collision on {}, regenerating", id);
    }
}
