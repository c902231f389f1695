/// Rolling checksum over the significant bytes of a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum(u32);

impl Checksum {
    pub fn push(&mut self, byte: u8) {
        self.0 = self.0.rotate_left(5).wrapping_add(u32::from(byte));
    }

    #[must_use]
    pub fn value(self) -> u32 { self.0 }
}

#[must_use]
pub fn checksum(bytes: &[u8]) -> u32 {
    let mut checksum = Checksum::default();
    for &byte in bytes {
        checksum.push(byte);
    }
    checksum.value()
}
