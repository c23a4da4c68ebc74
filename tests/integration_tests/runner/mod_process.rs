use std::fs;

use feature_sweep::config::ToolConfig;
use feature_sweep::{ProcessTool, Runner, SweepError};

use crate::integration_tests::_support::{DOC, Fixture};

#[cfg(unix)]
#[tokio::test]
async fn real_process_cycle_through_sh() {
    let mut fx = Fixture::new();
    fx.config.faulty_delay_secs = 1;
    // The first compile hangs until a clean has happened, so only the kill can end it.
    fx.config.tool = ToolConfig {
        program: "sh".into(),
        compile_args: vec![
            "-c".into(),
            "echo compile >> calls.log; if [ ! -f clean.done ]; then sleep 30; fi".into(),
        ],
        clean_args: vec!["-c".into(), "echo clean >> calls.log; touch clean.done; exit 1".into()],
        working_dir: Some(fx.dir.path().to_path_buf()),
    };
    let exps = fx.experiments("wordWindow\n");
    let tool = ProcessTool::new(&fx.config.tool);
    let mut runner = Runner::new(fx.config.clone(), tool, Vec::new());

    let started = std::time::Instant::now();
    let report = runner.run(&exps).await.unwrap();
    assert_eq!(report.experiments, 1);
    assert!(started.elapsed() < std::time::Duration::from_secs(20));

    let calls = fs::read_to_string(fx.dir.path().join("calls.log")).unwrap();
    assert_eq!(calls, "compile\nclean\ncompile\n");
    assert_eq!(fx.target_text(), DOC);
    assert_eq!(fs::read_to_string(&fx.results).unwrap(), "wordWindow\n");
}

#[tokio::test]
async fn unknown_tool_aborts_with_target_left_substituted() {
    let mut fx = Fixture::new();
    fx.config.faulty_delay_secs = 0;
    fx.config.tool.program = "feature-sweep-test-missing-tool".into();
    let exps = fx.experiments("posWindow\nchunk\n");
    let tool = ProcessTool::new(&fx.config.tool);
    let mut runner = Runner::new(fx.config.clone(), tool, Vec::new());

    let err = runner.run(&exps).await.unwrap_err();
    assert!(matches!(err, SweepError::Spawn { .. }));
    assert!(err.to_string().contains("feature-sweep-test-missing-tool"));
    assert!(fx.target_text().contains("\nusing posWindow\n"));
    assert_eq!(fs::read_to_string(&fx.results).unwrap(), "posWindow\n");
}

#[tokio::test]
async fn unknown_tool_with_rollback_restores_target() {
    let mut fx = Fixture::new();
    fx.config.faulty_delay_secs = 0;
    fx.config.restore_on_failure = true;
    fx.config.tool.program = "feature-sweep-test-missing-tool".into();
    let exps = fx.experiments("posWindow\n");
    let tool = ProcessTool::new(&fx.config.tool);
    let mut runner = Runner::new(fx.config.clone(), tool, Vec::new());

    assert!(runner.run(&exps).await.is_err());
    assert_eq!(fx.target_text(), DOC);
}
