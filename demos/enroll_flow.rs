//! OTP 注册与登录流程示例
//!
//! 展示如何用 OtpRS 实现 TOTP 两步验证的注册、登录验证,
//! 以及基于计数器的 HOTP 硬件令牌流程。
//!
//! 运行: cargo run --example enroll_flow

use otprs::hotp::{HotpConfig, HotpGenerator};
use otprs::secret::OtpSecret;
use otprs::totp::{TotpConfig, TotpManager};

/// OTP 服务
struct OtpService {
    totp_manager: TotpManager,
    hotp_generator: HotpGenerator,
    issuer: String,
}

/// 用户的 OTP 配置
struct UserOtpConfig {
    account: String,
    totp_secret: Option<OtpSecret>,
    hotp_secret: Option<OtpSecret>,
    hotp_counter: u64,
}

impl UserOtpConfig {
    fn new(account: &str) -> Self {
        Self {
            account: account.to_string(),
            totp_secret: None,
            hotp_secret: None,
            hotp_counter: 0,
        }
    }
}

struct SetupResult {
    secret_base32: String,
    otpauth_uri: String,
    current_code: String,
}

impl OtpService {
    fn new() -> Self {
        let totp_config = TotpConfig::default();

        let hotp_config = HotpConfig::default();

        Self {
            totp_manager: TotpManager::new(totp_config),
            hotp_generator: HotpGenerator::new(hotp_config),
            issuer: "OtpRS Example".to_string(),
        }
    }

    /// 启用 TOTP
    fn enable_totp(&self, config: &mut UserOtpConfig) -> Result<SetupResult, String> {
        // 1. 生成密钥
        let secret = self
            .totp_manager
            .generate_secret()
            .map_err(|e| format!("密钥生成失败: {}", e))?;

        // 2. 生成 otpauth URI (用于 QR 码)
        let uri = self
            .totp_manager
            .key_uri(&secret, &config.account, &self.issuer)
            .map_err(|e| format!("URI 生成失败: {}", e))?;

        // 3. 生成当前验证码（用于验证设置）
        let current_code = self
            .totp_manager
            .generate_code(&secret)
            .map_err(|e| format!("验证码生成失败: {}", e))?;

        // 4. 保存密钥
        let secret_base32 = secret.base32().to_string();
        config.totp_secret = Some(secret);

        Ok(SetupResult {
            secret_base32,
            otpauth_uri: uri,
            current_code,
        })
    }

    /// 验证 TOTP（设置确认与登录共用）
    fn verify_totp(&self, config: &UserOtpConfig, code: &str) -> Result<bool, String> {
        let secret = config.totp_secret.as_ref().ok_or("TOTP 未启用")?;

        self.totp_manager
            .verify(secret, code)
            .map_err(|e| format!("验证失败: {}", e))
    }

    /// 生成当前 TOTP 码（用于测试）
    fn generate_totp(&self, config: &UserOtpConfig) -> Result<String, String> {
        let secret = config.totp_secret.as_ref().ok_or("TOTP 未启用")?;

        self.totp_manager
            .generate_code(secret)
            .map_err(|e| format!("生成失败: {}", e))
    }

    /// 启用 HOTP
    fn enable_hotp(&self, config: &mut UserOtpConfig) -> Result<String, String> {
        let secret = self
            .hotp_generator
            .generate_secret()
            .map_err(|e| format!("密钥生成失败: {}", e))?;

        let base32 = secret.base32().to_string();
        config.hotp_secret = Some(secret);
        config.hotp_counter = 0;

        Ok(base32)
    }

    /// 生成 HOTP 码（模拟令牌按键,递增本地计数器）
    fn generate_hotp(&self, config: &mut UserOtpConfig) -> Result<String, String> {
        let secret = config.hotp_secret.as_ref().ok_or("HOTP 未启用")?;

        let code = self
            .hotp_generator
            .generate(secret, config.hotp_counter)
            .map_err(|e| format!("生成失败: {}", e))?;

        config.hotp_counter += 1;

        Ok(code)
    }

    /// 验证 HOTP
    fn verify_hotp(&self, config: &mut UserOtpConfig, code: &str) -> Result<bool, String> {
        let secret = config.hotp_secret.as_ref().ok_or("HOTP 未启用")?;

        // 使用 verify_with_result 获取匹配位置与重同步后的计数器
        let result = self
            .hotp_generator
            .verify_with_result(secret, code, config.hotp_counter)
            .map_err(|e| format!("验证失败: {}", e))?;

        if result.valid {
            // 计数器前进到匹配位置之后
            config.hotp_counter = result.next_counter;
        }

        Ok(result.valid)
    }
}

fn main() {
    println!("=== OtpRS 注册/登录流程示例 ===\n");

    let otp_service = OtpService::new();
    let mut user_config = UserOtpConfig::new("alice@example.com");

    // ===== TOTP 演示 =====
    println!("📱 设置 TOTP (基于时间的一次性密码)...");
    println!("   这种方式适用于 Google Authenticator、Authy 等 App\n");

    match otp_service.enable_totp(&mut user_config) {
        Ok(result) => {
            println!("   ✅ TOTP 密钥生成成功");
            println!("   Base32 密钥: {}", result.secret_base32);
            println!("   OTPAuth URI: {}", result.otpauth_uri);
            println!("   当前验证码: {}\n", result.current_code);

            // 模拟用户输入验证码验证设置
            println!("   🔍 验证 TOTP 设置...");
            match otp_service.verify_totp(&user_config, &result.current_code) {
                Ok(true) => println!("   ✅ TOTP 设置验证成功\n"),
                Ok(false) => println!("   ❌ TOTP 验证码错误\n"),
                Err(e) => println!("   ❌ 验证失败: {}\n", e),
            }

            // 模拟登录验证
            println!("   🔐 模拟登录验证...");
            let login_code = otp_service.generate_totp(&user_config).unwrap();
            println!("   当前验证码: {}", login_code);
            match otp_service.verify_totp(&user_config, &login_code) {
                Ok(true) => println!("   ✅ TOTP 登录验证成功\n"),
                Ok(false) => println!("   ❌ TOTP 验证码错误\n"),
                Err(e) => println!("   ❌ 验证失败: {}\n", e),
            }

            // 验证错误码
            println!("   🔐 尝试错误验证码...");
            match otp_service.verify_totp(&user_config, "000000") {
                Ok(true) => println!("   ✅ 验证成功\n"),
                Ok(false) => println!("   ❌ 验证码错误（预期行为）\n"),
                Err(e) => println!("   ❌ 验证失败: {}\n", e),
            }
        }
        Err(e) => {
            println!("   ❌ TOTP 设置失败: {}\n", e);
        }
    }

    // ===== HOTP 演示 =====
    println!("🔢 设置 HOTP (基于计数器的一次性密码)...");
    println!("   这种方式适用于硬件令牌等设备\n");

    match otp_service.enable_hotp(&mut user_config) {
        Ok(secret) => {
            println!("   ✅ HOTP 密钥生成成功");
            println!("   Base32 密钥: {}\n", secret);

            // 生成几个 HOTP 码
            println!("   📊 生成 HOTP 序列:");
            for _i in 0..5 {
                let counter_before = user_config.hotp_counter;
                let code = otp_service.generate_hotp(&mut user_config).unwrap();
                println!("   计数器 {}: {}", counter_before, code);
            }
            println!();

            // 模拟令牌与服务器脱同步:用户又按了两次按钮
            let _ = otp_service.generate_hotp(&mut user_config).unwrap();
            let ahead_code = otp_service.generate_hotp(&mut user_config).unwrap();
            let token_counter = user_config.hotp_counter;

            // 服务器仍停在计数器 5
            user_config.hotp_counter = 5;
            println!("   🔐 令牌已到计数器 {}, 服务器停在 5, 验证重同步...", token_counter);

            match otp_service.verify_hotp(&mut user_config, &ahead_code) {
                Ok(true) => println!(
                    "   ✅ HOTP 验证成功, 服务器计数器重同步到: {}\n",
                    user_config.hotp_counter
                ),
                Ok(false) => println!("   ❌ HOTP 验证码错误\n"),
                Err(e) => println!("   ❌ 验证失败: {}\n", e),
            }

            // 重放刚用过的码
            println!("   🔐 尝试重放同一个码...");
            match otp_service.verify_hotp(&mut user_config, &ahead_code) {
                Ok(true) => println!("   ✅ 验证成功\n"),
                Ok(false) => println!("   ❌ 验证码已失效（预期行为）\n"),
                Err(e) => println!("   ❌ 验证失败: {}\n", e),
            }
        }
        Err(e) => {
            println!("   ❌ HOTP 设置失败: {}\n", e);
        }
    }

    println!("=== 示例结束 ===");
}
