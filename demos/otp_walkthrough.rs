//! TOTP 计算过程走查示例
//!
//! 逐步打印一次 TOTP 计算的全部中间值,可直接与 RFC 6238 附录 B
//! 的测试向量对照,也可用于排查认证器与服务器不一致的问题。
//!
//! 运行: cargo run --example otp_walkthrough

use otprs::secret::OtpSecret;
use otprs::steps::TotpSteps;
use otprs::totp::{TotpConfig, TotpManager};

/// 打印一次计算的全部中间步骤
fn print_steps(steps: &TotpSteps) {
    println!("   Base32 密钥:    {}", steps.secret_base32);
    println!("   密钥字节 (hex): {}", steps.secret_hex);
    println!("   Unix 时间戳:    {}", steps.unix_timestamp);
    println!("   本周期剩余:     {} 秒", steps.seconds_remaining);
    println!(
        "   时间计数器:     {} (0x{})",
        steps.time_counter, steps.time_counter_hex
    );
    println!("   HMAC-SHA1 摘要: {}", steps.hmac_hex);
    println!("   动态截断偏移:   {}", steps.offset);
    println!(
        "   截断值:         0x{} = {}",
        steps.truncated_hex, steps.truncated_value
    );
    println!("   一次性密码:     {}", steps.otp);
}

fn main() {
    println!("=== OtpRS TOTP 计算走查 ===\n");

    // ===== RFC 6238 附录 B 向量 =====
    println!("📖 RFC 6238 附录 B (T = 59, 8 位):\n");

    let rfc_manager = TotpManager::new(TotpConfig::default().with_digits(8));
    let rfc_secret = OtpSecret::from_bytes(b"12345678901234567890".to_vec()).unwrap();

    match rfc_manager.generate_steps_at(&rfc_secret, 59) {
        Ok(steps) => {
            print_steps(&steps);
            println!();
            if steps.otp == "94287082" {
                println!("   ✅ 与 RFC 6238 附录 B 的预期值 94287082 一致\n");
            } else {
                println!("   ❌ 与 RFC 预期值 94287082 不一致\n");
            }
        }
        Err(e) => println!("   ❌ 计算失败: {}\n", e),
    }

    // ===== 实时计算 =====
    println!("⏱  实时计算 (6 位, 30 秒周期):\n");

    let manager = TotpManager::default_manager();
    let secret = manager.generate_secret().unwrap();

    match manager.generate_steps(&secret) {
        Ok(steps) => {
            print_steps(&steps);
            println!();

            // 追踪的最终输出与常规生成 API 一致
            match manager.verify(&secret, &steps.otp) {
                Ok(true) => println!("   ✅ 走查得到的验证码通过了常规验证\n"),
                Ok(false) => println!("   ❌ 验证码未通过验证\n"),
                Err(e) => println!("   ❌ 验证失败: {}\n", e),
            }

            // 结构可直接序列化,便于在调试面板中展示
            println!("   JSON 导出:");
            match serde_json::to_string_pretty(&steps) {
                Ok(json) => println!("{}\n", json),
                Err(e) => println!("   ❌ 序列化失败: {}\n", e),
            }
        }
        Err(e) => println!("   ❌ 计算失败: {}\n", e),
    }

    println!("=== 示例结束 ===");
}
