pub mod audio {
    pub mod domain {
        pub mod audio_normalizer;
        pub mod audio_segment;
        pub mod transcriber;
        pub mod transcript;
    }
    pub mod infrastructure {
        pub mod loudnorm_normalizer;
        pub mod whisper_transcriber;
    }
}

pub mod clip {
    pub mod domain {
        pub mod clip_error;
        pub mod clip_trimmer;
        pub mod media_source;
        pub mod output_name;
        pub mod time_span;
        pub mod timestamp;
    }
    pub mod infrastructure {
        pub mod ffmpeg_trimmer;
        pub mod yt_dlp_source;
    }
}

pub mod pipeline {
    pub mod clip_video_use_case;
    pub mod pipeline_logger;
    pub mod subtitle_video_use_case;
}

pub mod shared {
    pub mod constants;
    pub mod external_tool;
    pub mod model_resolver;
    pub mod prompt;
    pub mod settings;
    pub mod video_metadata;
}

pub mod subtitles {
    pub mod domain {
        pub mod segment_editor;
        pub mod subtitle_compositor;
        pub mod subtitle_error;
        pub mod subtitle_scheduler;
        pub mod word_cue;
    }
    pub mod infrastructure {
        pub mod ass_compositor;
        pub mod ass_document;
        pub mod prompt_segment_editor;
    }
}

pub mod video {
    pub mod domain {
        pub mod audio_reader;
        pub mod video_probe;
    }
    pub mod infrastructure {
        pub mod ffmpeg_audio_reader;
        pub mod ffmpeg_probe;
    }
}
