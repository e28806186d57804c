use crate::model::ResourceRequest;

use super::{Scheduler, SubmitCommand, shell_join};

/// Slurm (`sbatch --wrap`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Slurm;

/// `[D-]HH:MM:SS` as accepted by `--time`
fn format_time_limit(minutes: i64) -> String {
    let (days, rem) = (minutes / (24 * 60), minutes % (24 * 60));
    let (hours, mins) = (rem / 60, rem % 60);
    if days > 0 {
        format!("{days}-{hours:02}:{mins:02}:00")
    } else {
        format!("{hours:02}:{mins:02}:00")
    }
}

impl Scheduler for Slurm {
    fn program(&self) -> &'static str {
        "sbatch"
    }

    fn job_id_token(&self) -> &'static str {
        "%j"
    }

    fn render(
        &self,
        resources: &ResourceRequest,
        job_name: &str,
        command: &[String],
    ) -> SubmitCommand {
        let mut args = vec![
            format!("--partition={}", resources.queue),
            format!("--nodes={}", resources.nodes),
        ];
        if resources.gpu.count > 0 {
            args.push(format!("--gres=gpu:{}", resources.gpu.count));
            if resources.gpu.exclusive {
                args.push("--exclusive".to_string());
            }
        }
        args.extend([
            format!("--mem={}G", resources.memory_gb),
            format!(
                "--time={}",
                format_time_limit(resources.wall_clock_minutes())
            ),
            format!("--output={}", resources.stdout_path(self.job_id_token())),
            format!("--error={}", resources.stderr_path(self.job_id_token())),
            format!("--job-name={job_name}"),
            "--wrap".to_string(),
            shell_join(command),
        ]);

        SubmitCommand {
            program: self.program().to_string(),
            args,
        }
    }

    fn parse_job_id(&self, stdout: &str) -> Option<String> {
        // "Submitted batch job 1234"
        stdout.lines().find_map(|line| {
            let id = line.trim().strip_prefix("Submitted batch job ")?.trim();
            (!id.is_empty() && id.chars().all(|c| c.is_ascii_digit())).then(|| id.to_string())
        })
    }
}
