use anyhow::{anyhow, bail, Context, Result};
use dsplab::kernel::KernelLifecycle;
use dsplab::na::Complex;
use dsplab::signal::convolve::{
    convolve as convolve_baseline, ConvolveConfig, ConvolveKernel, ConvolveMode,
};
use dsplab::signal::filter::design::{
    design_fir_dyn as design_fir_baseline, FilterBandType, FirDesignConfig, FirDesignKernel,
};
use dsplab::signal::filter::{fir_filter as fir_filter_baseline, FirFilterConfig, FirFilterKernel};
use dsplab::signal::spectral::{
    center_spectrum, dft_padded as dft_baseline, magnitude_db, DftConfig, DftKernel,
};
use dsplab::signal::traits::{Convolve1D, Dft1D, FirFilter1D, FirWinDesign, WindowGenerate};
use dsplab::signal::windows::{
    hamming as hamming_baseline, kaiser as kaiser_baseline, WindowConfig, WindowKernel, WindowKind,
};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const DEFAULT_PYTHON_BIN: &str = "python";

const PY_SIGNAL_SCRIPT: &str = r#"
import json
import sys
import time
import numpy as np

env = json.loads(sys.stdin.read())
op = env["op"]
iters = int(env["iters"])
p = env["payload"]

def _as_array(key):
    return np.asarray(p[key], dtype=float)

def _flat(v):
    return np.asarray(v, dtype=float).reshape(-1)

def _window(name, nx, beta):
    if name == "rectangular":
        return np.ones(nx)
    if name == "hann":
        return np.hanning(nx)
    if name == "hamming":
        return np.hamming(nx)
    if name == "blackman":
        return np.blackman(nx)
    if name == "kaiser":
        return np.kaiser(nx, float(beta))
    raise RuntimeError(f"unsupported window: {name}")

def _windowed_sinc():
    order = int(p["order"])
    cutoff = _as_array("cutoff")
    m = np.arange(order + 1) - order // 2

    def lowpass(c):
        return c * np.sinc(c * m)

    band = p["band"]
    if band == "lowpass":
        h = lowpass(cutoff[0])
    elif band == "highpass":
        h = -lowpass(cutoff[0])
        h[order // 2] += 1.0
    elif band == "bandpass":
        h = lowpass(cutoff[1]) - lowpass(cutoff[0])
    elif band == "bandstop":
        h = lowpass(cutoff[0]) - lowpass(cutoff[1])
        h[order // 2] += 1.0
    else:
        raise RuntimeError(f"unsupported band: {band}")
    return h * _window(p["window"], order + 1, p.get("beta"))

def _compute():
    if op == "convolve":
        return np.convolve(_as_array("in1"), _as_array("in2"), mode=p["mode"])
    if op == "fir_filter":
        return np.convolve(_as_array("x"), _as_array("h"), mode=p["mode"])
    if op == "dft":
        y = np.fft.fft(_as_array("x"), n=int(p["n"]))
        return np.concatenate([y.real, y.imag])
    if op == "spectrum_db":
        y = np.fft.fft(_as_array("x"), n=int(p["n"]))
        return 20.0 * np.log10(np.abs(y) + 1e-10)
    if op == "spectrum_centered":
        y = np.fft.fftshift(np.fft.fft(_as_array("x"), n=int(p["n"])))
        return np.concatenate([y.real, y.imag])
    if op == "window":
        return _window(p["window"], int(p["nx"]), p.get("beta"))
    if op == "firwin":
        return _windowed_sinc()

    raise RuntimeError(f"unsupported op: {op}")

y = _flat(_compute())

t0 = time.perf_counter_ns()
for _ in range(iters):
    _compute()
t1 = time.perf_counter_ns()

print(json.dumps({
    "output": y.tolist(),
    "avg_ns": (t1 - t0) / max(iters, 1),
    "python_version": sys.version.split()[0],
    "numpy_version": np.__version__,
    "matplotlib_version": None
}))
"#;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct PythonEval {
    output: Vec<f64>,
    avg_ns: f64,
    python_version: String,
    numpy_version: String,
    matplotlib_version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ContractRow {
    case_id: String,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
    rust_candidate_ns: f64,
    rust_baseline_ns: f64,
    python_ns: f64,
    speedup_vs_baseline: f64,
    speedup_vs_python: f64,
    overlay_plot: String,
    residual_plot: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    python_executable: String,
    python_version: String,
    numpy_version: String,
    matplotlib_version: String,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("contracts") => run_contracts(),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
}

fn run_contracts() -> Result<()> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let out_dir = PathBuf::from(format!("target/contracts/{ts}"));
    let plots_dir = out_dir.join("plots");
    fs::create_dir_all(&plots_dir).context("creating contract output directories")?;

    let python_bin = detect_python_bin();

    let mut rows = Vec::new();
    let mut case_plot_payload = Vec::new();

    // Shared synthetic input for the 1D cases.
    let signal: Vec<f64> = (0..512)
        .map(|i| {
            let x = i as f64 / 24.0;
            x.sin() + 0.4 * (1.9 * x).cos() + 0.15 * (6.3 * x).sin()
        })
        .collect();

    // Convolution, full mode
    {
        let case_id = "convolve_full_f64";
        let in1 = signal.iter().copied().take(256).collect::<Vec<_>>();
        let in2: Vec<f64> = (0..49)
            .map(|i| {
                let x = (i as f64 - 24.0) / 10.0;
                (-(x * x) / 2.0).exp()
            })
            .collect();

        let kernel = ConvolveKernel::try_new(ConvolveConfig {
            mode: ConvolveMode::Full,
        })?;
        let candidate = kernel
            .run_alloc(in1.as_slice(), in2.as_slice())
            .map_err(|e| anyhow!("convolve candidate execution failed: {e}"))?;
        let baseline = convolve_baseline(&in1, &in2, ConvolveMode::Full);
        let py = python_signal_eval(
            &python_bin,
            "convolve",
            json!({ "in1": in1, "in2": in2, "mode": "full" }),
            200,
        )?;

        let candidate_ns = benchmark_avg_ns(120, || {
            kernel
                .run_alloc(&in1, &in2)
                .map(|_| ())
                .map_err(|e| anyhow!("convolve candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(120, || {
            let _ = convolve_baseline(&in1, &in2, ConvolveMode::Full);
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // Convolution, same mode
    {
        let case_id = "convolve_same_f64";
        let in1 = signal.iter().copied().take(320).collect::<Vec<_>>();
        let in2 = vec![0.25f64, 0.5, 1.0, 0.5, 0.25];

        let kernel = ConvolveKernel::try_new(ConvolveConfig {
            mode: ConvolveMode::Same,
        })?;
        let candidate = kernel
            .run_alloc(in1.as_slice(), in2.as_slice())
            .map_err(|e| anyhow!("convolve candidate execution failed: {e}"))?;
        let baseline = convolve_baseline(&in1, &in2, ConvolveMode::Same);
        let py = python_signal_eval(
            &python_bin,
            "convolve",
            json!({ "in1": in1, "in2": in2, "mode": "same" }),
            250,
        )?;

        let candidate_ns = benchmark_avg_ns(150, || {
            kernel
                .run_alloc(&in1, &in2)
                .map(|_| ())
                .map_err(|e| anyhow!("convolve candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(150, || {
            let _ = convolve_baseline(&in1, &in2, ConvolveMode::Same);
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // FIR filtering with designed taps, same mode
    {
        let case_id = "fir_filter_same_f64";
        let x = signal.iter().copied().take(400).collect::<Vec<_>>();
        let h = design_fir_baseline(
            FilterBandType::Lowpass,
            &[0.2f64],
            64,
            WindowKind::Hamming,
            None,
        )
        .map_err(|e| anyhow!("designing taps for the filter case failed: {e}"))?;

        let kernel = FirFilterKernel::try_new(FirFilterConfig {
            h: h.clone(),
            mode: ConvolveMode::Same,
        })?;
        let x_nd = Array1::from_vec(x.clone());
        let candidate = kernel
            .run_alloc(&x_nd)
            .map_err(|e| anyhow!("fir filter candidate execution failed: {e}"))?;
        let baseline = fir_filter_baseline(&h, &x, ConvolveMode::Same);
        let py = python_signal_eval(
            &python_bin,
            "fir_filter",
            json!({ "h": h, "x": x, "mode": "same" }),
            180,
        )?;

        let candidate_ns = benchmark_avg_ns(120, || {
            kernel
                .run_alloc(&x)
                .map(|_| ())
                .map_err(|e| anyhow!("fir filter candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(120, || {
            let _ = fir_filter_baseline(&h, &x, ConvolveMode::Same);
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // DFT at a power-of-two length, no padding applied
    {
        let case_id = "dft_256_f64";
        let x = signal.iter().copied().take(256).collect::<Vec<_>>();

        let kernel = DftKernel::try_new(DftConfig { padding: None })?;
        let spectrum = kernel
            .run_alloc(x.as_slice())
            .map_err(|e| anyhow!("dft candidate execution failed: {e}"))?;
        let n = spectrum.len();
        let candidate = flatten_complex(&spectrum);
        let baseline = flatten_complex(&dft_baseline(&x, None));
        let py = python_signal_eval(&python_bin, "dft", json!({ "x": x, "n": n }), 60)?;

        let candidate_ns = benchmark_avg_ns(20, || {
            kernel
                .run_alloc(x.as_slice())
                .map(|_| ())
                .map_err(|e| anyhow!("dft candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(20, || {
            let _ = dft_baseline(&x, None);
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // DFT of a non-power-of-two input, zero-padded to the next power of two
    {
        let case_id = "dft_padded_300_f64";
        let x = signal.iter().copied().take(300).collect::<Vec<_>>();

        let kernel = DftKernel::try_new(DftConfig { padding: None })?;
        let spectrum = kernel
            .run_alloc(x.as_slice())
            .map_err(|e| anyhow!("dft candidate execution failed: {e}"))?;
        let n = spectrum.len();
        let candidate = flatten_complex(&spectrum);
        let baseline = flatten_complex(&dft_baseline(&x, None));
        let py = python_signal_eval(&python_bin, "dft", json!({ "x": x, "n": n }), 40)?;

        let candidate_ns = benchmark_avg_ns(10, || {
            kernel
                .run_alloc(x.as_slice())
                .map(|_| ())
                .map_err(|e| anyhow!("dft candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(10, || {
            let _ = dft_baseline(&x, None);
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // Spectrum magnitude in dB
    {
        let case_id = "spectrum_db_f64";
        let x = signal.iter().copied().take(128).collect::<Vec<_>>();

        let kernel = DftKernel::try_new(DftConfig { padding: None })?;
        let spectrum = kernel
            .run_alloc(x.as_slice())
            .map_err(|e| anyhow!("dft candidate execution failed: {e}"))?;
        let candidate = magnitude_db(&spectrum);
        let baseline = magnitude_db(&dft_baseline(&x, None));
        let py = python_signal_eval(
            &python_bin,
            "spectrum_db",
            json!({ "x": x, "n": spectrum.len() }),
            120,
        )?;

        let candidate_ns = benchmark_avg_ns(60, || {
            let spectrum = kernel
                .run_alloc(x.as_slice())
                .map_err(|e| anyhow!("dft candidate benchmark failed: {e}"))?;
            let _ = magnitude_db(&spectrum);
            Ok(())
        })?;
        let baseline_ns = benchmark_avg_ns(60, || {
            let _ = magnitude_db(&dft_baseline(&x, None));
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // Zero-centered spectrum ordering
    {
        let case_id = "spectrum_centered_f64";
        let x = signal.iter().copied().take(128).collect::<Vec<_>>();

        let kernel = DftKernel::try_new(DftConfig { padding: None })?;
        let spectrum = kernel
            .run_alloc(x.as_slice())
            .map_err(|e| anyhow!("dft candidate execution failed: {e}"))?;
        let candidate = flatten_complex(&center_spectrum(&spectrum));
        let baseline = flatten_complex(&center_spectrum(&dft_baseline(&x, None)));
        let py = python_signal_eval(
            &python_bin,
            "spectrum_centered",
            json!({ "x": x, "n": spectrum.len() }),
            120,
        )?;

        let candidate_ns = benchmark_avg_ns(60, || {
            let spectrum = kernel
                .run_alloc(x.as_slice())
                .map_err(|e| anyhow!("dft candidate benchmark failed: {e}"))?;
            let _ = center_spectrum(&spectrum);
            Ok(())
        })?;
        let baseline_ns = benchmark_avg_ns(60, || {
            let _ = center_spectrum(&dft_baseline(&x, None));
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // Window (hamming)
    {
        let case_id = "window_hamming_f64";
        let kernel = WindowKernel::try_new(WindowConfig {
            kind: WindowKind::Hamming,
            nx: 128,
            beta: None,
        })?;
        let candidate: Vec<f64> = kernel
            .run_alloc()
            .map_err(|e| anyhow!("window candidate execution failed: {e}"))?;
        let baseline: Vec<f64> = hamming_baseline(128);
        let py = python_signal_eval(
            &python_bin,
            "window",
            json!({ "window": "hamming", "nx": 128 }),
            300,
        )?;

        let candidate_ns = benchmark_avg_ns(200, || {
            kernel
                .run_alloc()
                .map(|_| ())
                .map_err(|e| anyhow!("window candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(200, || {
            let _: Vec<f64> = hamming_baseline(128);
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // Window (kaiser)
    {
        let case_id = "window_kaiser_f64";
        let beta = 8.6f64;
        let kernel = WindowKernel::try_new(WindowConfig {
            kind: WindowKind::Kaiser,
            nx: 129,
            beta: Some(beta),
        })?;
        let candidate = kernel
            .run_alloc()
            .map_err(|e| anyhow!("window candidate execution failed: {e}"))?;
        let baseline = kaiser_baseline(129, beta);
        let py = python_signal_eval(
            &python_bin,
            "window",
            json!({ "window": "kaiser", "nx": 129, "beta": beta }),
            300,
        )?;

        let candidate_ns = benchmark_avg_ns(200, || {
            kernel
                .run_alloc()
                .map(|_| ())
                .map_err(|e| anyhow!("window candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(200, || {
            let _ = kaiser_baseline(129, beta);
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // FIR design (lowpass, hamming)
    {
        let case_id = "firwin_lowpass_f64";
        let kernel = FirDesignKernel::try_new(FirDesignConfig {
            band: FilterBandType::Lowpass,
            cutoff: vec![0.2f64],
            order: 64,
            window: WindowKind::Hamming,
            beta: None,
        })?;
        let candidate = kernel
            .run_alloc()
            .map_err(|e| anyhow!("firwin candidate execution failed: {e}"))?;
        let baseline = design_fir_baseline(
            FilterBandType::Lowpass,
            &[0.2f64],
            64,
            WindowKind::Hamming,
            None,
        )
        .map_err(|e| anyhow!("firwin baseline failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            "firwin",
            json!({
                "band": "lowpass",
                "cutoff": [0.2],
                "order": 64,
                "window": "hamming"
            }),
            250,
        )?;

        let candidate_ns = benchmark_avg_ns(180, || {
            kernel
                .run_alloc()
                .map(|_| ())
                .map_err(|e| anyhow!("firwin candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(180, || {
            let _ = design_fir_baseline(
                FilterBandType::Lowpass,
                &[0.2f64],
                64,
                WindowKind::Hamming,
                None,
            )
            .map_err(|e| anyhow!("firwin baseline benchmark failed: {e}"))?;
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    // FIR design (bandstop, blackman)
    {
        let case_id = "firwin_bandstop_f64";
        let kernel = FirDesignKernel::try_new(FirDesignConfig {
            band: FilterBandType::Bandstop,
            cutoff: vec![0.2f64, 0.6],
            order: 48,
            window: WindowKind::Blackman,
            beta: None,
        })?;
        let candidate = kernel
            .run_alloc()
            .map_err(|e| anyhow!("firwin candidate execution failed: {e}"))?;
        let baseline = design_fir_baseline(
            FilterBandType::Bandstop,
            &[0.2f64, 0.6],
            48,
            WindowKind::Blackman,
            None,
        )
        .map_err(|e| anyhow!("firwin baseline failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            "firwin",
            json!({
                "band": "bandstop",
                "cutoff": [0.2, 0.6],
                "order": 48,
                "window": "blackman"
            }),
            250,
        )?;

        let candidate_ns = benchmark_avg_ns(180, || {
            kernel
                .run_alloc()
                .map(|_| ())
                .map_err(|e| anyhow!("firwin candidate benchmark failed: {e}"))
        })?;
        let baseline_ns = benchmark_avg_ns(180, || {
            let _ = design_fir_baseline(
                FilterBandType::Bandstop,
                &[0.2f64, 0.6],
                48,
                WindowKind::Blackman,
                None,
            )
            .map_err(|e| anyhow!("firwin baseline benchmark failed: {e}"))?;
            Ok(())
        })?;

        record_case(
            &mut rows,
            &mut case_plot_payload,
            &plots_dir,
            case_id,
            candidate,
            baseline,
            py,
            candidate_ns,
            baseline_ns,
        )?;
    }

    let version_probe = python_versions(&python_bin)?;
    let report_pdf = out_dir.join("report.pdf");
    generate_plots_and_pdf(&python_bin, &case_plot_payload, &report_pdf)?;

    let bundle = ContractBundle {
        generated_epoch_seconds: ts,
        python_executable: python_bin.to_string_lossy().into_owned(),
        python_version: version_probe.python_version,
        numpy_version: version_probe.numpy_version,
        matplotlib_version: version_probe
            .matplotlib_version
            .unwrap_or_else(|| "unknown".to_string()),
        rows,
    };

    write_summary_csv(&out_dir.join("summary.csv"), &bundle.rows)?;
    fs::write(
        out_dir.join("summary.json"),
        serde_json::to_vec_pretty(&bundle).context("serializing summary bundle")?,
    )
    .context("writing summary.json")?;

    println!("Contract artifacts generated in: {}", out_dir.display());
    println!("  - {}", out_dir.join("summary.csv").display());
    println!("  - {}", out_dir.join("summary.json").display());
    println!("  - {}", report_pdf.display());
    println!("  - {}", plots_dir.display());
    println!("  - cases: {}", bundle.rows.len());

    Ok(())
}

fn detect_python_bin() -> PathBuf {
    PathBuf::from(DEFAULT_PYTHON_BIN)
}

fn python_versions(python_bin: &Path) -> Result<PythonEval> {
    run_python_eval(
        python_bin,
        r#"
import json, sys
import numpy
import matplotlib
payload = json.loads(sys.stdin.read())
print(json.dumps({
    "output": [],
    "avg_ns": 0.0,
    "python_version": sys.version.split()[0],
    "numpy_version": numpy.__version__,
    "matplotlib_version": matplotlib.__version__
}))
"#,
        json!({}),
    )
}

fn python_signal_eval(
    python_bin: &Path,
    op: &str,
    payload: serde_json::Value,
    iters: usize,
) -> Result<PythonEval> {
    run_python_eval(
        python_bin,
        PY_SIGNAL_SCRIPT,
        json!({
            "op": op,
            "iters": iters,
            "payload": payload
        }),
    )
}

fn run_python_eval(
    python_bin: &Path,
    script: &str,
    payload: serde_json::Value,
) -> Result<PythonEval> {
    let mut child = Command::new(python_bin)
        .arg("-c")
        .arg(script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning python interpreter at {}", python_bin.display()))?;

    {
        let stdin = child.stdin.as_mut().context("opening python stdin")?;
        let payload_bytes = serde_json::to_vec(&payload).context("serializing python payload")?;
        stdin
            .write_all(&payload_bytes)
            .context("writing payload to python stdin")?;
    }

    let output = child
        .wait_with_output()
        .context("waiting for python process")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("python execution failed: {stderr}");
    }
    let stdout = String::from_utf8(output.stdout).context("parsing python stdout utf8")?;
    let parsed: PythonEval = serde_json::from_str(stdout.trim()).context("parsing python json")?;
    Ok(parsed)
}

#[allow(clippy::too_many_arguments)]
fn record_case(
    rows: &mut Vec<ContractRow>,
    case_plot_payload: &mut Vec<serde_json::Value>,
    plots_dir: &Path,
    case_id: &str,
    candidate: Vec<f64>,
    baseline: Vec<f64>,
    py: PythonEval,
    candidate_ns: f64,
    baseline_ns: f64,
) -> Result<()> {
    ensure_same_length(case_id, &candidate, &baseline)?;
    ensure_same_length(case_id, &candidate, &py.output)?;

    let overlay = plots_dir.join(format!("{case_id}_overlay.png"));
    let residual = plots_dir.join(format!("{case_id}_residual.png"));

    rows.push(build_row(RowBuildInput {
        case_id,
        rust_candidate: &candidate,
        python_reference: &py.output,
        rust_candidate_ns: candidate_ns,
        rust_baseline_ns: baseline_ns,
        python_ns: py.avg_ns,
        overlay_plot: &overlay,
        residual_plot: &residual,
    }));

    case_plot_payload.push(json!({
        "case_id": case_id,
        "rust_candidate": candidate,
        "python_reference": py.output,
        "overlay_plot": overlay.to_string_lossy(),
        "residual_plot": residual.to_string_lossy()
    }));

    Ok(())
}

/// Real parts then imaginary parts, matching the layout the reference
/// script builds with `np.concatenate([y.real, y.imag])`.
fn flatten_complex(spectrum: &[Complex<f64>]) -> Vec<f64> {
    let mut out = Vec::with_capacity(spectrum.len() * 2);
    out.extend(spectrum.iter().map(|z| z.re));
    out.extend(spectrum.iter().map(|z| z.im));
    out
}

fn ensure_same_length(case_id: &str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        bail!(
            "case {case_id} has mismatched output lengths: left={}, right={}",
            a.len(),
            b.len()
        );
    }
    Ok(())
}

fn benchmark_avg_ns<F>(iters: usize, mut f: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let start = Instant::now();
    for _ in 0..iters {
        f()?;
    }
    Ok(start.elapsed().as_nanos() as f64 / iters as f64)
}

struct RowBuildInput<'a> {
    case_id: &'a str,
    rust_candidate: &'a [f64],
    python_reference: &'a [f64],
    rust_candidate_ns: f64,
    rust_baseline_ns: f64,
    python_ns: f64,
    overlay_plot: &'a Path,
    residual_plot: &'a Path,
}

fn build_row(args: RowBuildInput<'_>) -> ContractRow {
    let pearson_r = pearson(args.rust_candidate, args.python_reference);
    let mae = mean_abs_error(args.rust_candidate, args.python_reference);
    let rmse = root_mean_squared_error(args.rust_candidate, args.python_reference);
    let max_abs = max_abs_error(args.rust_candidate, args.python_reference);
    ContractRow {
        case_id: args.case_id.to_string(),
        pearson_r,
        mae,
        rmse,
        max_abs,
        rust_candidate_ns: args.rust_candidate_ns,
        rust_baseline_ns: args.rust_baseline_ns,
        python_ns: args.python_ns,
        speedup_vs_baseline: args.rust_baseline_ns / args.rust_candidate_ns,
        speedup_vs_python: args.python_ns / args.rust_candidate_ns,
        overlay_plot: args.overlay_plot.to_string_lossy().into_owned(),
        residual_plot: args.residual_plot.to_string_lossy().into_owned(),
    }
}

fn mean_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
        / a.len() as f64
}

fn root_mean_squared_error(a: &[f64], b: &[f64]) -> f64 {
    (a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        / a.len() as f64)
        .sqrt()
}

fn max_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let da = *x - mean_a;
        let db = *y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        if a == b {
            1.0
        } else {
            0.0
        }
    } else {
        cov / (var_a.sqrt() * var_b.sqrt())
    }
}

fn write_summary_csv(path: &Path, rows: &[ContractRow]) -> Result<()> {
    let mut out = String::new();
    out.push_str("case_id,pearson_r,mae,rmse,max_abs,rust_candidate_ns,rust_baseline_ns,python_ns,speedup_vs_baseline,speedup_vs_python,overlay_plot,residual_plot\n");
    for row in rows {
        out.push_str(&format!(
            "{},{:.12},{:.12},{:.12},{:.12},{:.3},{:.3},{:.3},{:.6},{:.6},{},{}\n",
            row.case_id,
            row.pearson_r,
            row.mae,
            row.rmse,
            row.max_abs,
            row.rust_candidate_ns,
            row.rust_baseline_ns,
            row.python_ns,
            row.speedup_vs_baseline,
            row.speedup_vs_python,
            row.overlay_plot,
            row.residual_plot
        ));
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}

fn generate_plots_and_pdf(
    python_bin: &Path,
    case_payload: &[serde_json::Value],
    report_pdf: &Path,
) -> Result<()> {
    let payload = json!({
        "cases": case_payload,
        "report_pdf": report_pdf.to_string_lossy()
    });
    let script = r#"
import json
import sys
import matplotlib
matplotlib.use("Agg")
import matplotlib.pyplot as plt
from matplotlib.backends.backend_pdf import PdfPages

payload = json.loads(sys.stdin.read())
cases = payload["cases"]
report_pdf = payload["report_pdf"]

with PdfPages(report_pdf) as pdf:
    for case in cases:
        case_id = case["case_id"]
        rust = case["rust_candidate"]
        py = case["python_reference"]
        x = list(range(len(py)))
        residual = [ri - pi for ri, pi in zip(rust, py)]

        fig_overlay = plt.figure(figsize=(10, 4))
        ax_overlay = fig_overlay.add_subplot(1, 1, 1)
        ax_overlay.plot(x, py, label="Python reference", linewidth=1.6)
        ax_overlay.plot(x, rust, label="Rust candidate", linewidth=1.2, alpha=0.8)
        ax_overlay.set_title(f"{case_id} :: overlay")
        ax_overlay.set_xlabel("index")
        ax_overlay.set_ylabel("value")
        ax_overlay.legend()
        fig_overlay.tight_layout()
        fig_overlay.savefig(case["overlay_plot"], dpi=150)
        pdf.savefig(fig_overlay)
        plt.close(fig_overlay)

        fig_residual = plt.figure(figsize=(10, 4))
        ax_residual = fig_residual.add_subplot(1, 1, 1)
        ax_residual.plot(x, residual, label="Rust - Python", linewidth=1.2, color="tab:red")
        ax_residual.set_title(f"{case_id} :: residual")
        ax_residual.set_xlabel("index")
        ax_residual.set_ylabel("error")
        ax_residual.legend()
        fig_residual.tight_layout()
        fig_residual.savefig(case["residual_plot"], dpi=150)
        pdf.savefig(fig_residual)
        plt.close(fig_residual)
"#;

    let mut child = Command::new(python_bin)
        .arg("-c")
        .arg(script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning python interpreter at {}", python_bin.display()))?;

    {
        let stdin = child.stdin.as_mut().context("opening python stdin")?;
        let payload_bytes = serde_json::to_vec(&payload).context("serializing plot payload")?;
        stdin
            .write_all(&payload_bytes)
            .context("writing plot payload to python stdin")?;
    }

    let output = child
        .wait_with_output()
        .context("waiting for python plot process")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("plot/pdf generation failed: {stderr}");
    }

    Ok(())
}
