//! End-to-end tests: raw text in, speakable pieces out.

use std::sync::Arc;

use zhnorm::charmap::{save_map, CodePointMap, S2T_FILE, T2S_FILE};
use zhnorm::{NormalizerConfig, TextNormalizer};

fn quiet() -> TextNormalizer {
    TextNormalizer::from_config(NormalizerConfig { quiet: true, ..Default::default() })
}

#[test]
fn test_dates_and_temperatures() {
    let out = quiet().process("今天是2021年5月19日，气温-3℃~5℃，湿度51%。");
    assert_eq!(
        out,
        vec!["今天是二零二一年五月十九日,", "气温零下三度至五度,", "湿度百分之五十一."]
    );
}

#[test]
fn test_uniform_number() {
    let out = quiet().process("请拨打400-123-4567咨询！");
    assert_eq!(out, vec!["请拨打四零零幺二三四五六七咨询!"]);
}

#[test]
fn test_mobile_with_country_code() {
    let out = quiet().process("我的手机是+86 13912345678。");
    assert_eq!(out, vec!["我的手机是中国幺三九幺二三四五六七八."]);
}

#[test]
fn test_price_with_thousands_separator() {
    let out = quiet().process("售价1,299.50元。");
    assert_eq!(out, vec!["售价一千二百九十九点五元."]);
}

#[test]
fn test_math_expression() {
    let out = quiet().process("1+1=2。");
    assert_eq!(out, vec!["一加一等于二."]);
}

#[test]
fn test_url_and_case() {
    let out = quiet().process("访问Google.com吧");
    assert_eq!(out, vec!["访问google dot come 吧"]);
}

#[test]
fn test_short_tail_merged_and_order_kept() {
    let out = quiet().process("第一句话在这里。第二句话也在这。好。");
    assert_eq!(out, vec!["第一句话在这里.", "第二句话也在这.好."]);
}

#[test]
fn test_long_piece_keeps_every_number() {
    let text = vec!["7"; 5000].join(" ");
    let out = quiet().process(&text);
    let spoken: usize = out.iter().map(|p| p.matches('七').count()).sum();
    assert_eq!(spoken, 5000);
    assert!(out.iter().all(|p| !p.contains('7')));
}

#[test]
fn test_empty_input() {
    assert!(quiet().process("").is_empty());
    assert!(quiet().process("   ").is_empty());
}

#[test]
fn test_traditional_and_fullwidth_input() {
    let dir = tempfile::tempdir().unwrap();
    let t2s: CodePointMap = [('國', '国'), ('語', '语')].into_iter().collect();
    save_map(&t2s, &dir.path().join(T2S_FILE)).unwrap();
    save_map(&t2s.inverted(), &dir.path().join(S2T_FILE)).unwrap();

    let cfg = NormalizerConfig {
        char_map_dir: Some(dir.path().to_path_buf()),
        quiet: true,
        ..Default::default()
    };
    let tn = TextNormalizer::try_from_config(cfg).unwrap();
    assert_eq!(tn.process("國語考了１２３分。"), vec!["国语考了一百二十三分."]);
    assert_eq!(tn.cascade().tables().simplified_to_traditional("国语"), "國語");
}

#[test]
fn test_shared_across_threads() {
    let tn = Arc::new(quiet());
    let text = "会议在8:30开始，预计持续2小时。";
    let expected = tn.process(text);
    assert_eq!(expected, vec!["会议在八点半开始,", "预计持续二小时."]);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tn = Arc::clone(&tn);
                s.spawn(move || tn.process(text))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
