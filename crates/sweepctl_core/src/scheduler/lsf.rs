use crate::model::ResourceRequest;

use super::{Scheduler, SubmitCommand};

/// IBM Spectrum LSF (`bsub`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Lsf;

impl Scheduler for Lsf {
    fn program(&self) -> &'static str {
        "bsub"
    }

    fn job_id_token(&self) -> &'static str {
        "%J"
    }

    fn render(
        &self,
        resources: &ResourceRequest,
        job_name: &str,
        command: &[String],
    ) -> SubmitCommand {
        let mut args = vec![
            "-q".to_string(),
            resources.queue.clone(),
            "-n".to_string(),
            resources.nodes.to_string(),
        ];
        if resources.gpu.count > 0 {
            let mode = if resources.gpu.exclusive { "yes" } else { "no" };
            args.push("-gpu".to_string());
            args.push(format!("num={}:j_exclusive={mode}", resources.gpu.count));
        }
        // mem is in the cluster's LSF_UNIT_FOR_LIMITS, GB on GPU queues
        let minutes = resources.wall_clock_minutes();
        args.extend([
            "-R".to_string(),
            format!("rusage[mem={}] span[ptile=1]", resources.memory_gb),
            "-W".to_string(),
            format!("{}:{:02}", minutes / 60, minutes % 60),
            "-o".to_string(),
            resources.stdout_path(self.job_id_token()),
            "-eo".to_string(),
            resources.stderr_path(self.job_id_token()),
            "-J".to_string(),
            job_name.to_string(),
        ]);
        args.extend(command.iter().cloned());

        SubmitCommand {
            program: self.program().to_string(),
            args,
        }
    }

    fn parse_job_id(&self, stdout: &str) -> Option<String> {
        // "Job <1234> is submitted to queue <gpuqueue>."
        let rest = &stdout[stdout.find("Job <")? + "Job <".len()..];
        let id = &rest[..rest.find('>')?];
        (!id.is_empty() && id.chars().all(|c| c.is_ascii_digit())).then(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;
    use crate::model::GpuRequest;

    #[test]
    fn test_render_default_request() {
        let command = vec!["python".to_string(), "basis_free.py".to_string()];
        let cmd = Lsf.render(&ResourceRequest::default(), "job_0", &command);

        assert_eq!(cmd.program, "bsub");
        assert_eq!(
            cmd.args,
            vec![
                "-q",
                "gpuqueue",
                "-n",
                "1",
                "-gpu",
                "num=1:j_exclusive=yes",
                "-R",
                "rusage[mem=4] span[ptile=1]",
                "-W",
                "0:59",
                "-o",
                "%J.stdout",
                "-eo",
                "%J.stderr",
                "-J",
                "job_0",
                "python",
                "basis_free.py",
            ]
        );
    }

    #[test]
    fn test_render_without_gpu_and_long_wall_clock() {
        let resources = ResourceRequest {
            gpu: GpuRequest {
                count: 0,
                exclusive: false,
            },
            wall_clock: SignedDuration::from_hours(26) + SignedDuration::from_mins(5),
            ..Default::default()
        };
        let cmd = Lsf.render(&resources, "job", &[]);

        assert!(!cmd.args.iter().any(|a| a == "-gpu"));
        let w = cmd.args.iter().position(|a| a == "-W").unwrap();
        assert_eq!(cmd.args[w + 1], "26:05");
    }

    #[test]
    fn test_parse_job_id() {
        assert_eq!(
            Lsf.parse_job_id("Job <48213> is submitted to queue <gpuqueue>.\n"),
            Some("48213".to_string())
        );
        assert_eq!(Lsf.parse_job_id("Request aborted by esub."), None);
        assert_eq!(Lsf.parse_job_id("Job <> is submitted"), None);
    }
}
