use crate::result::Result;

/// read only color channel that carries one watermark bit
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct ColorChannel(pub u8);

impl From<u8> for ColorChannel {
    fn from(value: u8) -> Self {
        ColorChannel(value)
    }
}

/// mutable color channel for storing one watermark bit
#[derive(Debug, Eq, PartialEq)]
pub struct ColorChannelMut<'a>(pub &'a mut u8);

pub trait HideBit {
    fn hide_bit(self, bit: bool) -> Result<()>;
}

pub trait UnveilBit {
    fn unveil_bit(self) -> bool;
}

impl HideBit for ColorChannelMut<'_> {
    fn hide_bit(self, bit: bool) -> Result<()> {
        *self.0 = (*self.0 & (u8::MAX - 1)) | u8::from(bit);
        Ok(())
    }
}

impl UnveilBit for ColorChannel {
    fn unveil_bit(self) -> bool {
        self.0 & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_channel_mut_should_only_touch_the_lsb() {
        let mut color: u8 = 0b1010_1010;
        ColorChannelMut(&mut color).hide_bit(true).unwrap();
        assert_eq!(color, 0b1010_1011);

        ColorChannelMut(&mut color).hide_bit(false).unwrap();
        assert_eq!(color, 0b1010_1010);
    }

    #[test]
    fn color_channel_should_unveil_the_lsb() {
        assert!(ColorChannel(0xff).unveil_bit());
        assert!(!ColorChannel(0xfe).unveil_bit());
    }
}
