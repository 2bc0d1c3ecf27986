//! 集成测试:一次性密码引擎
//!
//! 测试 TOTP/HOTP 的完整生成验证流程、密钥配置 URI 与错误分类。

use otprs::error::Error;
use otprs::hotp::{HotpConfig, HotpGenerator};
use otprs::secret::OtpSecret;
use otprs::totp::{TotpConfig, TotpManager};

/// 测试 TOTP 基本流程
#[test]
fn test_totp_basic_flow() {
    let config = TotpConfig::default();
    let manager = TotpManager::new(config);

    // 1. 为用户生成密钥
    let secret = manager
        .generate_secret()
        .expect("Secret generation should succeed");

    assert!(!secret.base32().is_empty(), "Secret should not be empty");

    // 2. 生成当前 TOTP 码
    let code = manager
        .generate_code(&secret)
        .expect("Code generation should succeed");

    // TOTP 码应该是 6 位数字
    assert_eq!(code.len(), 6, "TOTP code should be 6 digits");
    assert!(
        code.chars().all(|c| c.is_ascii_digit()),
        "TOTP code should only contain digits"
    );

    // 3. 验证生成的码
    let is_valid = manager
        .verify(&secret, &code)
        .expect("Verification should work");
    assert!(is_valid, "Generated code should be valid");

    // 4. 错误码应该验证失败
    let wrong_code = "000000";
    let is_wrong_valid = manager
        .verify(&secret, wrong_code)
        .expect("Verification should work");
    // 注意：有极小概率 000000 恰好是当前有效码
    if code != wrong_code {
        assert!(!is_wrong_valid, "Wrong code should fail verification");
    }
}

/// 测试完整的注册/登录流程
#[test]
fn test_totp_enrollment_flow() {
    // 1. 用户请求开启两步验证
    let manager = TotpManager::default_manager();

    // 2. 系统生成密钥
    let secret = manager.generate_secret().unwrap();

    // 3. 系统生成 otpauth URI 供二维码渲染层使用
    let qr_uri = manager
        .key_uri(&secret, "user@example.com", "MyApp")
        .unwrap();
    assert!(
        qr_uri.starts_with("otpauth://totp/MyApp:user%40example.com?"),
        "URI should carry issuer-prefixed label"
    );
    assert!(
        qr_uri.contains(&format!("secret={}", secret.base32())),
        "URI should contain the base32 secret"
    );

    // 4. 用户扫描后,认证器与系统各自独立生成同一个码
    let setup_code = manager.generate_code(&secret).unwrap();

    // 5. 系统验证用户输入,确认认证器配置正确
    let is_setup_valid = manager.verify(&secret, &setup_code).unwrap();
    assert!(is_setup_valid, "Setup verification should succeed");

    // 6. 模拟后续登录验证
    let login_code = manager.generate_code(&secret).unwrap();
    let is_login_valid = manager.verify(&secret, &login_code).unwrap();
    assert!(is_login_valid, "Login verification should succeed");
}

/// 测试 TOTP 密钥从 base32 恢复
#[test]
fn test_totp_secret_restore() {
    let manager = TotpManager::default_manager();

    // 生成原始密钥
    let original_secret = manager.generate_secret().unwrap();
    let base32_string = original_secret.base32().to_string();

    // 从 base32 恢复密钥
    let restored_secret =
        OtpSecret::from_base32(&base32_string).expect("Secret should be restored from base32");

    // 两个密钥在同一时间戳生成的码应该相同
    let original_code = manager.generate_code_at(&original_secret, 1_700_000_000).unwrap();
    let restored_code = manager.generate_code_at(&restored_secret, 1_700_000_000).unwrap();

    assert_eq!(
        original_code, restored_code,
        "Restored secret should generate same code"
    );
}

/// 测试用户手工输入的密钥格式被宽容处理
#[test]
fn test_totp_secret_tolerates_user_input() {
    let manager = TotpManager::default_manager();

    // 认证器应用展示的密钥常被分组、小写甚至带填充
    let canonical = OtpSecret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
    let typed = OtpSecret::from_base32("gezd gnbv gy3t qojq gezd gnbv gy3t qojq==").unwrap();

    assert_eq!(
        canonical.base32(),
        typed.base32(),
        "Canonical form should be identical"
    );

    let code_canonical = manager.generate_code_at(&canonical, 59).unwrap();
    let code_typed = manager.generate_code_at(&typed, 59).unwrap();
    assert_eq!(code_canonical, code_typed, "Both secrets should agree");
}

/// 测试 TOTP 配置选项
#[test]
fn test_totp_configuration() {
    // 使用自定义配置
    let config = TotpConfig::new()
        .with_digits(8) // 8 位码
        .with_step_seconds(60) // 60 秒周期
        .with_window(2); // 允许前后 2 个周期

    let manager = TotpManager::new(config);
    let secret = manager.generate_secret().unwrap();

    // 生成的码应该是 8 位
    let code = manager.generate_code(&secret).unwrap();
    assert_eq!(code.len(), 8, "Code should be 8 digits with custom config");

    // 验证应该工作
    let is_valid = manager.verify(&secret, &code).unwrap();
    assert!(is_valid, "Code should be valid with custom config");

    // URI 应该反映配置
    let uri = manager.key_uri(&secret, "alice", "MyApp").unwrap();
    assert!(uri.contains("digits=8"), "URI should carry digits");
    assert!(uri.contains("period=60"), "URI should carry period");
}

/// 测试时钟漂移窗口(使用显式时间戳,完全确定)
#[test]
fn test_totp_clock_drift_window() {
    let manager = TotpManager::default_manager();
    let secret = OtpSecret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();

    // 认证器时钟慢了一个时间步:用户在 T=90 输入 T=60 时段的码
    let late_code = manager.generate_code_at(&secret, 60).unwrap();
    assert!(
        manager.verify_at(&secret, &late_code, 90).unwrap(),
        "Code one step behind should be accepted with window=1"
    );

    // 认证器时钟快了一个时间步
    let early_code = manager.generate_code_at(&secret, 120).unwrap();
    assert!(
        manager.verify_at(&secret, &early_code, 90).unwrap(),
        "Code one step ahead should be accepted with window=1"
    );

    // 相差两个时间步则拒绝
    let far_code = manager.generate_code_at(&secret, 150).unwrap();
    assert!(
        !manager.verify_at(&secret, &far_code, 90).unwrap(),
        "Code two steps away should be rejected with window=1"
    );
}

/// 测试 RFC 6238 附录 B 测试向量(通过公开 API)
#[test]
fn test_rfc6238_vectors_through_public_api() {
    let manager = TotpManager::new(TotpConfig::default().with_digits(8));
    let secret = OtpSecret::from_bytes(b"12345678901234567890".to_vec()).unwrap();

    let vectors: [(u64, &str); 6] = [
        (59, "94287082"),
        (1_111_111_109, "07081804"),
        (1_111_111_111, "14050471"),
        (1_234_567_890, "89005924"),
        (2_000_000_000, "69279037"),
        (20_000_000_000, "65353130"),
    ];

    for (timestamp, expected) in vectors {
        let code = manager.generate_code_at(&secret, timestamp).unwrap();
        assert_eq!(code, expected, "RFC vector failed at T={}", timestamp);
        assert!(
            manager.verify_at(&secret, expected, timestamp).unwrap(),
            "RFC vector should verify at its own timestamp"
        );
    }
}

/// 测试 HOTP 基本流程
#[test]
fn test_hotp_basic_flow() {
    let config = HotpConfig::default();
    let generator = HotpGenerator::new(config);

    // 生成密钥
    let secret = generator
        .generate_secret()
        .expect("Secret generation should succeed");

    // 使用计数器 0 生成码
    let code_0 = generator
        .generate(&secret, 0)
        .expect("Code generation should succeed");

    assert_eq!(code_0.len(), 6, "HOTP code should be 6 digits");

    // 验证计数器 0 的码
    let (is_valid, next_counter) = generator
        .verify(&secret, &code_0, 0)
        .expect("Verification should work");
    assert!(is_valid, "Code for counter 0 should be valid");
    assert_eq!(next_counter, 1, "Next counter should advance past match");

    // 计数器 1 应该生成不同的码
    let code_1 = generator.generate(&secret, 1).unwrap();
    assert_ne!(
        code_0, code_1,
        "Different counters should produce different codes"
    );
}

/// 测试 HOTP 计数器序列
#[test]
fn test_hotp_counter_sequence() {
    let generator = HotpGenerator::default_generator();
    let secret = OtpSecret::from_bytes(b"12345678901234567890".to_vec()).unwrap();

    // 生成一系列码
    let mut codes = Vec::new();
    for counter in 0..10 {
        let code = generator.generate(&secret, counter).unwrap();
        codes.push(code.clone());

        // 每个码都应该对其计数器有效
        let (is_valid_result, _) = generator.verify(&secret, &code, counter).unwrap();
        assert!(is_valid_result, "Code should be valid for its counter");
    }

    // RFC 4226 向量下所有码各不相同
    let unique_codes: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(unique_codes.len(), codes.len(), "All codes should be unique");
}

/// 测试 HOTP 重同步:客户端计数器跑到了服务器前面
#[test]
fn test_hotp_resynchronization() {
    let generator = HotpGenerator::new(HotpConfig::default().with_look_ahead_window(5));
    let secret = generator.generate_secret().unwrap();

    // 服务器停在计数器 3,用户按了几次按钮,认证器已到计数器 6
    let client_code = generator.generate(&secret, 6).unwrap();

    let result = generator
        .verify_with_result(&secret, &client_code, 3)
        .unwrap();
    assert!(result.valid, "Code within look-ahead window should verify");
    assert_eq!(result.matched_counter, Some(6), "Match should be reported");
    assert_eq!(
        result.next_counter, 7,
        "Server should resync past the matched counter"
    );

    // 超出窗口的码被拒绝,计数器保持不变
    let too_far = generator.generate(&secret, 20).unwrap();
    let result = generator.verify_with_result(&secret, &too_far, 3).unwrap();
    assert!(!result.valid, "Code beyond look-ahead window should fail");
    assert_eq!(result.next_counter, 3, "Counter should stay put on failure");
}

/// 测试 RFC 4226 附录 D 测试向量(通过公开 API)
#[test]
fn test_rfc4226_vectors_through_public_api() {
    let generator = HotpGenerator::default_generator();
    let secret = OtpSecret::from_bytes(b"12345678901234567890".to_vec()).unwrap();

    let expected_codes = [
        "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583", "399871",
        "520489",
    ];

    for (counter, expected) in expected_codes.iter().enumerate() {
        let code = generator.generate(&secret, counter as u64).unwrap();
        assert_eq!(&code, expected, "RFC vector failed at counter {}", counter);
    }
}

/// 测试跨实现向量:常见库使用的 base32 密钥
#[test]
fn test_hotp_cross_library_vectors() {
    let generator = HotpGenerator::default_generator();
    let secret = OtpSecret::from_base32("base32secret3232").unwrap();

    assert_eq!(generator.generate(&secret, 0).unwrap(), "260182");
    // 前导零必须保留
    assert_eq!(generator.generate(&secret, 1).unwrap(), "055283");
    assert_eq!(generator.generate(&secret, 1401).unwrap(), "316439");
}

/// 测试步骤追踪与公开生成 API 的一致性
#[test]
fn test_steps_trace_flow() {
    let manager = TotpManager::default_manager();
    let secret = OtpSecret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();

    let steps = manager.generate_steps_at(&secret, 59).unwrap();
    let code = manager.generate_code_at(&secret, 59).unwrap();

    // 追踪的每个值都来自真实流水线
    assert_eq!(steps.otp, code, "Trace OTP should equal pipeline output");
    assert_eq!(steps.time_counter, 1, "T=59 lies in counter 1");
    assert_eq!(steps.seconds_remaining, 1, "One second left in the step");
    assert_eq!(steps.hmac_hex.len(), 40, "Digest should be 20 bytes");
    assert!(steps.offset <= 15, "Offset comes from a 4-bit nibble");
}

/// 测试错误分类:每类错误都从公开 API 可达
#[test]
fn test_error_taxonomy() {
    let manager = TotpManager::default_manager();

    // 1. 空密钥
    let err = OtpSecret::from_bytes(Vec::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidSecret(_)), "Empty raw secret");

    // 2. 不含任何有效字符的 base32 输入
    let err = OtpSecret::from_base32("!!??01").unwrap_err();
    assert!(
        matches!(err, Error::InvalidSecret(_)),
        "All-invalid base32 input"
    );

    // 3. 非法配置阻止生成
    let secret = OtpSecret::from_base32("GEZDGNBVGY3TQOJQ").unwrap();
    let bad_manager = TotpManager::new(TotpConfig::default().with_digits(0));
    let err = bad_manager.generate_code_at(&secret, 59).unwrap_err();
    assert!(
        matches!(err, Error::InvalidConfiguration { .. }),
        "Zero digits"
    );

    let bad_manager = TotpManager::new(TotpConfig::default().with_step_seconds(0));
    let err = bad_manager.verify_at(&secret, "123456", 59).unwrap_err();
    assert!(
        matches!(err, Error::InvalidConfiguration { .. }),
        "Zero step"
    );

    // 4. 空账户标签
    let err = manager.key_uri(&secret, "", "MyApp").unwrap_err();
    assert!(matches!(err, Error::InvalidLabel(_)), "Empty account label");

    // 每个错误都有可读的描述
    let err = OtpSecret::from_bytes(Vec::new()).unwrap_err();
    assert!(!err.to_string().is_empty(), "Errors should display");
}
