//! LIS3DH accelerometer driver (I2C)
//!
//! The LIS3DH is a three-axis MEMS accelerometer. This driver runs it in
//! high-resolution (12-bit) mode with block data update enabled, so the
//! high and low bytes of a sample always come from the same conversion.
//!
//! # I2C Protocol
//!
//! - 7-bit address 0x18 (SDO low) or 0x19 (SDO high)
//! - Register reads are write-then-read with the register address
//! - Setting bit 7 of the register address auto-increments it, which lets
//!   all six output bytes be read in one transaction
//! - Output is little-endian, left-justified in 16 bits

use embedded_hal_async::i2c::I2c;
use strider_core::config::SamplingConfig;
use strider_core::motion::Sample;
use strider_core::traits::MotionSensor;

/// LIS3DH register addresses
pub mod reg {
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0F;
    /// Data rate and axis enables
    pub const CTRL_REG1: u8 = 0x20;
    /// Full scale, resolution, block data update
    pub const CTRL_REG4: u8 = 0x23;
    /// Data ready flags
    pub const STATUS_REG: u8 = 0x27;
    /// First output register (X low byte)
    pub const OUT_X_L: u8 = 0x28;
}

/// I2C address with SDO tied low
pub const DEFAULT_ADDRESS: u8 = 0x18;

/// I2C address with SDO tied high
pub const ALT_ADDRESS: u8 = 0x19;

/// Expected WHO_AM_I value
pub const WHO_AM_I_VALUE: u8 = 0x33;

/// Register address flag for multi-byte reads
const AUTO_INCREMENT: u8 = 0x80;

/// CTRL_REG1: X, Y and Z axes enabled, normal power
const XYZ_ENABLE: u8 = 0x07;

/// CTRL_REG4: block data update
const BDU: u8 = 0x80;

/// CTRL_REG4: high-resolution output
const HR: u8 = 0x08;

/// Output data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    Hz1,
    Hz10,
    Hz25,
    Hz50,
    Hz100,
    Hz200,
    Hz400,
}

impl DataRate {
    /// Slowest rate that is at least `hz`
    pub fn at_least(hz: u16) -> Self {
        match hz {
            0..=1 => Self::Hz1,
            2..=10 => Self::Hz10,
            11..=25 => Self::Hz25,
            26..=50 => Self::Hz50,
            51..=100 => Self::Hz100,
            101..=200 => Self::Hz200,
            _ => Self::Hz400,
        }
    }

    /// Nominal rate in Hz
    pub fn hz(&self) -> u16 {
        match self {
            Self::Hz1 => 1,
            Self::Hz10 => 10,
            Self::Hz25 => 25,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
            Self::Hz200 => 200,
            Self::Hz400 => 400,
        }
    }

    /// ODR field value for CTRL_REG1
    pub fn odr_bits(&self) -> u8 {
        match self {
            Self::Hz1 => 0x1,
            Self::Hz10 => 0x2,
            Self::Hz25 => 0x3,
            Self::Hz50 => 0x4,
            Self::Hz100 => 0x5,
            Self::Hz200 => 0x6,
            Self::Hz400 => 0x7,
        }
    }
}

/// Measurement range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScale {
    G2,
    G4,
    G8,
    G16,
}

impl FullScale {
    /// Smallest range that covers `mg` milli-g
    pub fn covering_mg(mg: i32) -> Self {
        match mg.unsigned_abs() {
            0..=2000 => Self::G2,
            2001..=4000 => Self::G4,
            4001..=8000 => Self::G8,
            _ => Self::G16,
        }
    }

    /// FS field value for CTRL_REG4
    pub fn fs_bits(&self) -> u8 {
        match self {
            Self::G2 => 0b00,
            Self::G4 => 0b01,
            Self::G8 => 0b10,
            Self::G16 => 0b11,
        }
    }

    /// Milli-g per digit of the 12-bit high-resolution output
    pub fn mg_per_digit(&self) -> i32 {
        match self {
            Self::G2 => 1,
            Self::G4 => 2,
            Self::G8 => 4,
            Self::G16 => 12,
        }
    }
}

/// LIS3DH driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lis3dhConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Output data rate
    pub data_rate: DataRate,
    /// Measurement range
    pub full_scale: FullScale,
}

impl Default for Lis3dhConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            data_rate: DataRate::Hz10,
            full_scale: FullScale::G4,
        }
    }
}

impl Lis3dhConfig {
    /// Configuration matching the watch sampling rate and mapping range
    pub fn for_watch(sampling: &SamplingConfig, full_scale_mg: i32) -> Self {
        Self {
            data_rate: DataRate::at_least(sampling.rate_hz),
            full_scale: FullScale::covering_mg(full_scale_mg),
            ..Self::default()
        }
    }

    /// CTRL_REG1 value
    pub fn ctrl_reg1(&self) -> u8 {
        (self.data_rate.odr_bits() << 4) | XYZ_ENABLE
    }

    /// CTRL_REG4 value
    pub fn ctrl_reg4(&self) -> u8 {
        BDU | (self.full_scale.fs_bits() << 4) | HR
    }
}

/// Convert six output bytes (X, Y, Z little-endian) to milli-g
pub fn decode_sample(raw: &[u8; 6], full_scale: FullScale) -> Sample {
    let axis = |lo: u8, hi: u8| -> i16 {
        // 12-bit value left-justified in 16 bits
        let digits = i32::from(i16::from_le_bytes([lo, hi]) >> 4);
        let mg = digits * full_scale.mg_per_digit();
        mg.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
    };
    Sample::new(
        axis(raw[0], raw[1]),
        axis(raw[2], raw[3]),
        axis(raw[4], raw[5]),
    )
}

/// LIS3DH driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelError<E> {
    /// I2C bus error
    Bus(E),
    /// WHO_AM_I returned an unexpected value
    BadWhoAmI(u8),
}

/// LIS3DH driver
pub struct Lis3dh<I2C> {
    i2c: I2C,
    config: Lis3dhConfig,
}

impl<I2C: I2c> Lis3dh<I2C> {
    /// Create a new driver; call `init` before reading
    pub fn new(i2c: I2C, config: Lis3dhConfig) -> Self {
        Self { i2c, config }
    }

    /// Get the driver configuration
    pub fn config(&self) -> &Lis3dhConfig {
        &self.config
    }

    /// Verify the device and apply the configuration
    pub async fn init(&mut self) -> Result<(), AccelError<I2C::Error>> {
        let id = self
            .read_register(reg::WHO_AM_I)
            .await
            .map_err(AccelError::Bus)?;
        if id != WHO_AM_I_VALUE {
            return Err(AccelError::BadWhoAmI(id));
        }

        self.write_register(reg::CTRL_REG4, self.config.ctrl_reg4())
            .await
            .map_err(AccelError::Bus)?;
        self.write_register(reg::CTRL_REG1, self.config.ctrl_reg1())
            .await
            .map_err(AccelError::Bus)?;
        Ok(())
    }

    /// Read the six output bytes in one transaction
    pub async fn read_raw(&mut self) -> Result<[u8; 6], I2C::Error> {
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.config.address, &[reg::OUT_X_L | AUTO_INCREMENT], &mut raw)
            .await?;
        Ok(raw)
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn read_register(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(self.config.address, &[register], &mut value)
            .await?;
        Ok(value[0])
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.config.address, &[register, value]).await
    }
}

impl<I2C: I2c> MotionSensor for Lis3dh<I2C> {
    type Error = AccelError<I2C::Error>;

    async fn read_sample(&mut self) -> Result<Sample, Self::Error> {
        let raw = self.read_raw().await.map_err(AccelError::Bus)?;
        Ok(decode_sample(&raw, self.config.full_scale))
    }
}
