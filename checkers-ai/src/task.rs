//! 后台搜索
//!
//! 在独立线程中运行搜索，调用方通过轮询获取结果，不阻塞界面或对局循环

use std::thread;
use std::time::Instant;

use checkers_rules::BoardState;
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use tracing::{debug, warn};

use crate::error::Result;
use crate::search::{AiEngine, SearchResult};

/// 后台搜索完成后交还的引擎和结果
pub type SearchOutcome = (AiEngine, Result<SearchResult>);

/// 后台搜索任务
///
/// 引擎随任务移入工作线程，完成后连同结果一起交还，校准数据得以保留。
/// 丢弃任务即放弃搜索：工作线程照常结束，结果被丢弃。
pub struct BackgroundSearch {
    receiver: Receiver<SearchOutcome>,
    started_at: Instant,
    finished: bool,
}

impl BackgroundSearch {
    /// 启动后台搜索
    pub fn spawn(mut engine: AiEngine, state: BoardState) -> Self {
        let (sender, receiver) = bounded(1);

        thread::spawn(move || {
            let result = engine.search(&state);
            if sender.send((engine, result)).is_err() {
                debug!("后台搜索结果已被丢弃");
            }
        });

        Self {
            receiver,
            started_at: Instant::now(),
            finished: false,
        }
    }

    /// 轮询结果（非阻塞），完成后只返回一次
    pub fn poll(&mut self) -> Option<SearchOutcome> {
        if self.finished {
            return None;
        }

        match self.receiver.try_recv() {
            Ok(outcome) => {
                self.finished = true;
                debug!("后台搜索完成, 耗时 {:?}", self.started_at.elapsed());
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                warn!("后台搜索线程异常退出");
                None
            }
        }
    }

    /// 阻塞等待结果，结果已被取走或线程异常退出时返回 None
    pub fn wait(mut self) -> Option<SearchOutcome> {
        if self.finished {
            return None;
        }
        self.finished = true;
        self.receiver.recv().ok()
    }

    /// 是否已经取走结果
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 搜索已进行的时间
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}
