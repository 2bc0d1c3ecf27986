//! 属性测试:对任意输入都必须成立的法则
//!
//! 覆盖 Base32 编解码往返、验证码形状、确定性以及 TOTP 与 HOTP 的等价关系。

use proptest::prelude::*;

use otprs::base32;
use otprs::hotp::{HotpConfig, HotpGenerator};
use otprs::secret::OtpSecret;
use otprs::totp::{time_counter, TotpConfig, TotpManager};

proptest! {
    /// 任意字节序列编码后再解码应还原自身
    #[test]
    fn base32_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let encoded = base32::encode(&bytes);
        prop_assert_eq!(base32::decode(&encoded), bytes);
    }

    /// 解码对小写与填充不敏感,重编码后回到规范形式
    #[test]
    fn base32_decode_is_tolerant(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let canonical = base32::encode(&bytes);
        let mangled = format!("{}==", canonical.to_lowercase());
        prop_assert_eq!(base32::encode(&base32::decode(&mangled)), canonical);
    }

    /// 验证码长度恒等于配置的位数,且只含 ASCII 数字
    #[test]
    fn hotp_code_shape_matches_digits(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
        counter in any::<u64>(),
        digits in 6u32..=8,
    ) {
        let secret = OtpSecret::from_bytes(bytes).unwrap();
        let generator = HotpGenerator::new(HotpConfig::default().with_digits(digits));
        let code = generator.generate(&secret, counter).unwrap();
        prop_assert_eq!(code.len(), digits as usize);
        prop_assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    /// 相同密钥与计数器两次生成的结果一致
    #[test]
    fn hotp_is_deterministic(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
        counter in any::<u64>(),
    ) {
        let secret = OtpSecret::from_bytes(bytes).unwrap();
        let generator = HotpGenerator::default_generator();
        let first = generator.generate(&secret, counter).unwrap();
        let second = generator.generate(&secret, counter).unwrap();
        prop_assert_eq!(first, second);
    }

    /// TOTP 恰好是对时间导出计数器执行的 HOTP
    #[test]
    fn totp_equals_hotp_at_derived_counter(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
        timestamp in any::<u64>(),
        step in 1u64..=300,
    ) {
        let secret = OtpSecret::from_bytes(bytes).unwrap();
        let manager = TotpManager::new(TotpConfig::default().with_step_seconds(step));
        let generator = HotpGenerator::default_generator();

        let totp = manager.generate_code_at(&secret, timestamp).unwrap();
        let hotp = generator.generate(&secret, time_counter(timestamp, step)).unwrap();
        prop_assert_eq!(totp, hotp);
    }

    /// 自己生成的码在同一时间戳下总能通过验证
    #[test]
    fn generated_code_verifies_at_same_timestamp(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
        timestamp in any::<u64>(),
    ) {
        let secret = OtpSecret::from_bytes(bytes).unwrap();
        let manager = TotpManager::default_manager();
        let code = manager.generate_code_at(&secret, timestamp).unwrap();
        prop_assert!(manager.verify_at(&secret, &code, timestamp).unwrap());
    }

    /// 恢复出的密钥与原密钥生成完全相同的码
    #[test]
    fn secret_survives_base32_round_trip(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
        counter in any::<u64>(),
    ) {
        let original = OtpSecret::from_bytes(bytes).unwrap();
        let restored = OtpSecret::from_base32(original.base32()).unwrap();
        prop_assert_eq!(original.raw(), restored.raw());

        let generator = HotpGenerator::default_generator();
        prop_assert_eq!(
            generator.generate(&original, counter).unwrap(),
            generator.generate(&restored, counter).unwrap()
        );
    }
}
